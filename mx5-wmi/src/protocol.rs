//! Protocol constants for the MX5-R2 keyboard LED firmware interface

/// GUID of the WMI interface (PNP0C14) exposing the `WMBB` method
pub const MX5R2_GUID: &str = "ABBC0F6D-8EA1-11D1-00A0-C90629100000";

/// Driver name, used for the D-Bus bus name and log prefixes
pub const DRIVER_NAME: &str = "mx5kbleds";

/// WMI instance passed to every evaluation
pub const WMI_INSTANCE: u32 = 0x00;

/// `WMBB` method id for keyboard LED control (see DSDT)
pub const SET_KB_LED: u32 = 0x67;

/// Number of independently addressable LED regions
pub const REGION_COUNT: usize = 3;

/// 32-bit opcodes understood by `SET_KB_LED`
pub mod op {
    /// Color-set header; region goes in bits 24..26
    pub const SET_COLOR: u32 = 0xF000_0000;
    /// Brightness-set header; brightness goes in the low byte
    pub const SET_BRIGHTNESS: u32 = 0xF400_0000;
    /// Sent before every mode change
    pub const RESET_MODE: u32 = 0x1000_0000;

    // Canned animation modes
    pub const RANDOM_COLOR: u32 = 0x7000_0000;
    pub const BREATHE: u32 = 0x1002_A000;
    pub const CYCLE: u32 = 0x3301_0000;
    pub const WAVE: u32 = 0xB000_0000;
    pub const DANCE: u32 = 0x8000_0000;
    pub const TEMPO: u32 = 0x9000_0000;
    pub const FLASH: u32 = 0xA000_0000;

    /// Get human-readable name for an opcode header
    pub fn name(opcode: u32) -> &'static str {
        match opcode {
            RESET_MODE => "RESET_MODE",
            RANDOM_COLOR => "MODE_RANDOM_COLOR",
            BREATHE => "MODE_BREATHE",
            CYCLE => "MODE_CYCLE",
            WAVE => "MODE_WAVE",
            DANCE => "MODE_DANCE",
            TEMPO => "MODE_TEMPO",
            FLASH => "MODE_FLASH",
            _ => match opcode & 0xFF00_0000 {
                0xF000_0000..=0xF200_0000 => "SET_COLOR",
                SET_BRIGHTNESS => "SET_BRIGHTNESS",
                _ => "UNKNOWN",
            },
        }
    }
}
