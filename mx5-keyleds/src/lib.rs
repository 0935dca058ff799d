//! Keyboard backlight control for the Eurocom MX5-R2
//!
//! This crate holds the authoritative lighting model (three region colors, a
//! global brightness and the active mode) and keeps it in step with the
//! firmware through a [`WmiChannel`].
//!
//! The one rule that is not a plain store: every color write forces custom
//! mode, and a color write made while an animation runs first restores the
//! whole stored palette, so switching back to custom through any single color
//! control brings back the last full custom palette.

pub mod attributes;
pub mod error;
pub mod led;
pub mod sync;

pub use attributes::Attribute;
pub use error::KeyboardError;
pub use led::{LightingState, Mode, RgbColor, StartupPalette, BRIGHTNESS_DEFAULT, BRIGHTNESS_MAX};
pub use sync::SyncLeds;

// Re-export the wire vocabulary for consumers
pub use mx5_wmi::{Animation, Command, Region, WmiChannel, WmiError};

use tracing::{debug, info};

/// Result of an accepted write
///
/// The in-memory state is committed in both cases; `HardwareFailed` only
/// says that the firmware may not show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every opcode was submitted successfully
    Applied,
    /// At least one opcode could not be submitted
    HardwareFailed {
        failed: usize,
        submitted: usize,
        /// First firmware error of the operation
        reason: String,
    },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Short label used by the attribute host
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::HardwareFailed { .. } => "hardware-failed",
        }
    }
}

/// Submission counter for one logical operation
#[derive(Debug, Default)]
struct Tally {
    submitted: usize,
    failed: usize,
    first_error: Option<WmiError>,
}

impl Tally {
    fn outcome(self) -> Outcome {
        match self.first_error {
            None => Outcome::Applied,
            Some(e) => Outcome::HardwareFailed {
                failed: self.failed,
                submitted: self.submitted,
                reason: e.to_string(),
            },
        }
    }
}

/// Lighting state manager
///
/// Owns the [`LightingState`] and is the only caller of the firmware channel.
/// Operations run inline: the state is updated and every opcode submitted
/// before they return. A failed submission is logged and reported through
/// [`Outcome`], never by rolling the state back.
pub struct KeyboardLeds {
    channel: WmiChannel,
    state: LightingState,
}

impl KeyboardLeds {
    /// Create a state manager with default state, without probing
    pub fn new(channel: WmiChannel) -> Self {
        Self {
            channel,
            state: LightingState::default(),
        }
    }

    /// Probe for the WMI interface and create a state manager
    pub fn open(channel: WmiChannel) -> Result<Self, KeyboardError> {
        info!("Checking for GUID {}", channel.guid());
        if !channel.probe() {
            return Err(KeyboardError::UnsupportedPlatform(format!(
                "WMI interface {} not found",
                channel.guid()
            )));
        }
        info!("Found WMI interface ({})", channel.info().description);
        Ok(Self::new(channel))
    }

    /// Get the underlying channel
    pub fn channel(&self) -> &WmiChannel {
        &self.channel
    }

    pub fn state(&self) -> &LightingState {
        &self.state
    }

    pub fn color(&self, region: Region) -> RgbColor {
        self.state.color(region)
    }

    pub fn brightness(&self) -> u8 {
        self.state.brightness
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    fn submit(&self, tally: &mut Tally, cmd: Command) {
        tally.submitted += 1;
        if let Err(e) = self.channel.submit(&cmd) {
            tally.failed += 1;
            tally.first_error.get_or_insert(e);
        }
    }

    fn apply_color(&mut self, tally: &mut Tally, region: Region, color: RgbColor) {
        debug!("{} <- {}", region.name(), color);
        self.state.colors[region.as_u8() as usize] = color;
        self.state.mode = Mode::Custom;
        self.submit(tally, Command::set_color(region, color.r, color.g, color.b));
    }

    fn apply_stored_colors(&mut self, tally: &mut Tally) {
        for region in Region::ALL {
            let color = self.state.color(region);
            self.apply_color(tally, region, color);
        }
    }

    fn apply_brightness(&mut self, tally: &mut Tally, level: u8) {
        debug!("brightness <- {}", level);
        self.state.brightness = level;
        self.submit(tally, Command::SetBrightness(level));
    }

    // === Colors ===

    /// Set one region's color by firmware region index
    ///
    /// Indices outside the three regions are rejected without side effects.
    pub fn set_region_color(
        &mut self,
        region: u8,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<Outcome, KeyboardError> {
        let region = Region::from_u8(region).ok_or_else(|| {
            KeyboardError::InvalidInput(format!("region {region} out of range 0-2"))
        })?;
        Ok(self.set_color(region, RgbColor::new(red, green, blue)))
    }

    /// Store a region color, force custom mode and send it to firmware
    pub fn set_color(&mut self, region: Region, color: RgbColor) -> Outcome {
        let mut tally = Tally::default();
        self.apply_color(&mut tally, region, color);
        tally.outcome()
    }

    /// Re-send all three stored colors
    ///
    /// Goes through the color setter, so the mode ends up as custom.
    pub fn restore_custom_colors(&mut self) -> Outcome {
        let mut tally = Tally::default();
        self.apply_stored_colors(&mut tally);
        tally.outcome()
    }

    /// Color write as issued by a region attribute
    ///
    /// While an animation runs the full stored palette is restored first,
    /// then the new color is applied.
    pub fn write_region_color(&mut self, region: Region, color: RgbColor) -> Outcome {
        let mut tally = Tally::default();
        if self.state.mode != Mode::Custom {
            debug!("leaving {} mode, restoring custom palette", self.state.mode);
            self.apply_stored_colors(&mut tally);
        }
        self.apply_color(&mut tally, region, color);
        tally.outcome()
    }

    // === Brightness ===

    /// Set global brightness, clamped to 0-255
    ///
    /// Does not touch the mode.
    pub fn set_brightness(&mut self, value: i64) -> Outcome {
        let level = value.clamp(0, BRIGHTNESS_MAX as i64) as u8;
        let mut tally = Tally::default();
        self.apply_brightness(&mut tally, level);
        tally.outcome()
    }

    // === Modes ===

    /// Select a mode by firmware mode number (0-7)
    pub fn set_mode(&mut self, mode: u8) -> Result<Outcome, KeyboardError> {
        let mode = Mode::from_u8(mode).ok_or_else(|| {
            KeyboardError::InvalidInput(format!("mode {mode} out of range 0-7"))
        })?;
        Ok(self.set_mode_to(mode))
    }

    /// Select a mode
    ///
    /// The firmware mode is always reset first. Custom re-sends the stored
    /// colors and brightness; any other mode is stored and started, leaving
    /// the stored palette untouched.
    pub fn set_mode_to(&mut self, mode: Mode) -> Outcome {
        debug!("mode <- {}", mode);
        let mut tally = Tally::default();
        self.submit(&mut tally, Command::ResetMode);

        match mode.animation() {
            None => {
                self.apply_stored_colors(&mut tally);
                let level = self.state.brightness;
                self.apply_brightness(&mut tally, level);
            }
            Some(animation) => {
                self.state.mode = mode;
                self.submit(&mut tally, Command::Animate(animation));
            }
        }
        tally.outcome()
    }

    // === Lifecycle ===

    /// Apply the startup palette
    pub fn initialize(&mut self, palette: &StartupPalette) -> Outcome {
        info!(
            "Applying startup palette: left={} center={} right={} brightness={}",
            palette.left, palette.center, palette.right, palette.brightness
        );
        let mut tally = Tally::default();
        for region in Region::ALL {
            self.apply_color(&mut tally, region, palette.color(region));
        }
        self.apply_brightness(&mut tally, palette.brightness);
        tally.outcome()
    }
}
