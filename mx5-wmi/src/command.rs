//! Type-safe opcode builders and decoders
//!
//! Every command understood by `SET_KB_LED` is a single 32-bit word. This
//! module owns the bit layout so that nothing else in the workspace shifts
//! bytes around by hand.

use std::fmt;

use crate::protocol::op;

// =============================================================================
// Regions
// =============================================================================

/// Independently colorable keyboard zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Region {
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Region {
    /// All regions in index order
    pub const ALL: [Region; 3] = [Region::Left, Region::Center, Region::Right];

    /// Get region from its firmware index
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Left),
            1 => Some(Self::Center),
            2 => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Attribute name of this region
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

// =============================================================================
// Animations
// =============================================================================

/// Firmware-driven animation
///
/// Only the canned modes live here. Custom mode has no opcode of its own, it
/// is reached by re-sending colors and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Animation {
    RandomColor,
    Breathe,
    Cycle,
    Wave,
    Dance,
    Tempo,
    Flash,
}

impl Animation {
    pub const ALL: [Animation; 7] = [
        Animation::RandomColor,
        Animation::Breathe,
        Animation::Cycle,
        Animation::Wave,
        Animation::Dance,
        Animation::Tempo,
        Animation::Flash,
    ];

    /// Mode-select opcode for this animation
    pub fn opcode(self) -> u32 {
        match self {
            Self::RandomColor => op::RANDOM_COLOR,
            Self::Breathe => op::BREATHE,
            Self::Cycle => op::CYCLE,
            Self::Wave => op::WAVE,
            Self::Dance => op::DANCE,
            Self::Tempo => op::TEMPO,
            Self::Flash => op::FLASH,
        }
    }

    /// Reverse lookup of [`Animation::opcode`]
    pub fn from_opcode(opcode: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.opcode() == opcode)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// A single command for the keyboard LED firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set one region to an RGB color
    SetColor {
        region: Region,
        red: u8,
        green: u8,
        blue: u8,
    },
    /// Set global brightness
    SetBrightness(u8),
    /// Reset the firmware mode; precedes every mode change
    ResetMode,
    /// Start a canned animation
    Animate(Animation),
}

impl Command {
    /// Build a color-set command
    pub fn set_color(region: Region, red: u8, green: u8, blue: u8) -> Self {
        Self::SetColor {
            region,
            red,
            green,
            blue,
        }
    }

    /// Encode to the 32-bit word sent to firmware
    ///
    /// Color words carry the channels as `blue, red, green` from high to low
    /// below the `0xF0 | region` header.
    pub fn opcode(&self) -> u32 {
        match *self {
            Self::SetColor {
                region,
                red,
                green,
                blue,
            } => {
                op::SET_COLOR
                    | (region.as_u8() as u32) << 24
                    | (blue as u32) << 16
                    | (red as u32) << 8
                    | green as u32
            }
            Self::SetBrightness(level) => op::SET_BRIGHTNESS | level as u32,
            Self::ResetMode => op::RESET_MODE,
            Self::Animate(animation) => animation.opcode(),
        }
    }

    /// Coarse category, used by monitor filters
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SetColor { .. } => CommandKind::Color,
            Self::SetBrightness(_) => CommandKind::Brightness,
            Self::ResetMode | Self::Animate(_) => CommandKind::Mode,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetColor {
                region,
                red,
                green,
                blue,
            } => write!(
                f,
                "SetColor {} ({red}, {green}, {blue}) #{red:02X}{green:02X}{blue:02X}",
                region.name()
            ),
            Self::SetBrightness(level) => write!(f, "SetBrightness {level}"),
            Self::ResetMode => f.write_str("ResetMode"),
            Self::Animate(animation) => write!(f, "Animate {animation:?}"),
        }
    }
}

/// Command category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Color,
    Brightness,
    Mode,
}

// =============================================================================
// Decoding
// =============================================================================

/// Result of decoding a raw opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedCommand {
    Known(Command),
    Unknown(u32),
}

/// Decode a raw opcode back into a [`Command`]
///
/// Exact constants are matched before the header bytes, since the breathe
/// opcode shares its top byte with the mode reset.
pub fn try_parse_opcode(opcode: u32) -> ParsedCommand {
    if opcode == op::RESET_MODE {
        return ParsedCommand::Known(Command::ResetMode);
    }
    if let Some(animation) = Animation::from_opcode(opcode) {
        return ParsedCommand::Known(Command::Animate(animation));
    }

    let header = (opcode >> 24) as u8;
    match header {
        0xF0..=0xF2 => {
            // Header range guarantees a valid region index
            let region = Region::from_u8(header & 0x0F).unwrap_or(Region::Left);
            ParsedCommand::Known(Command::SetColor {
                region,
                blue: (opcode >> 16) as u8,
                red: (opcode >> 8) as u8,
                green: opcode as u8,
            })
        }
        0xF4 if opcode & 0x00FF_FF00 == 0 => {
            ParsedCommand::Known(Command::SetBrightness(opcode as u8))
        }
        _ => ParsedCommand::Unknown(opcode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opcode_layout() {
        let cmd = Command::set_color(Region::Center, 0x11, 0x22, 0x33);
        // header | region | blue | red | green
        assert_eq!(cmd.opcode(), 0xF133_1122);

        let cmd = Command::set_color(Region::Left, 0, 0, 0xFF);
        assert_eq!(cmd.opcode(), 0xF0FF_0000);

        let cmd = Command::set_color(Region::Right, 255, 255, 255);
        assert_eq!(cmd.opcode(), 0xF2FF_FFFF);
    }

    #[test]
    fn test_brightness_opcode() {
        assert_eq!(Command::SetBrightness(0).opcode(), 0xF400_0000);
        assert_eq!(Command::SetBrightness(0x80).opcode(), 0xF400_0080);
        assert_eq!(Command::SetBrightness(255).opcode(), 0xF400_00FF);
    }

    #[test]
    fn test_mode_opcodes() {
        assert_eq!(Command::ResetMode.opcode(), 0x1000_0000);
        assert_eq!(Animation::RandomColor.opcode(), 0x7000_0000);
        assert_eq!(Animation::Breathe.opcode(), 0x1002_a000);
        assert_eq!(Animation::Cycle.opcode(), 0x3301_0000);
        assert_eq!(Animation::Wave.opcode(), 0xB000_0000);
        assert_eq!(Animation::Dance.opcode(), 0x8000_0000);
        assert_eq!(Animation::Tempo.opcode(), 0x9000_0000);
        assert_eq!(Animation::Flash.opcode(), 0xA000_0000);
    }

    #[test]
    fn test_parse_distinguishes_breathe_from_reset() {
        assert_eq!(
            try_parse_opcode(0x1000_0000),
            ParsedCommand::Known(Command::ResetMode)
        );
        assert_eq!(
            try_parse_opcode(0x1002_A000),
            ParsedCommand::Known(Command::Animate(Animation::Breathe))
        );
    }

    #[test]
    fn test_parse_color_word() {
        assert_eq!(
            try_parse_opcode(0xF20A_141E),
            ParsedCommand::Known(Command::set_color(Region::Right, 20, 30, 10))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            try_parse_opcode(0xF3FF_FFFF),
            ParsedCommand::Unknown(0xF3FF_FFFF)
        );
        assert_eq!(
            try_parse_opcode(0xF400_0100),
            ParsedCommand::Unknown(0xF400_0100)
        );
        assert_eq!(try_parse_opcode(0), ParsedCommand::Unknown(0));
    }

    #[test]
    fn test_region_index() {
        assert_eq!(Region::from_u8(1), Some(Region::Center));
        assert_eq!(Region::from_u8(3), None);
        assert_eq!(Region::Right.as_u8(), 2);
    }
}
