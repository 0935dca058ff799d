//! LED and RGB lighting types

use std::fmt;

use mx5_wmi::protocol::REGION_COUNT;
use mx5_wmi::{Animation, Region};

/// Maximum brightness value
pub const BRIGHTNESS_MAX: u8 = 255;

/// Brightness after initialization
pub const BRIGHTNESS_DEFAULT: u8 = BRIGHTNESS_MAX;

/// RGB color value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create color from a packed `0xRRGGBB` value
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// Pack as `0xRRGGBB`
    pub const fn to_packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
}

/// Attribute text form: decimal channels separated by single spaces
impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// Lighting mode as numbered by the firmware (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mode {
    RandomColor = 0,
    #[default]
    Custom = 1,
    Breathe = 2,
    Cycle = 3,
    Wave = 4,
    Dance = 5,
    Tempo = 6,
    Flash = 7,
}

impl Mode {
    /// All modes in enumeration order
    pub const ALL: [Mode; 8] = [
        Mode::RandomColor,
        Mode::Custom,
        Mode::Breathe,
        Mode::Cycle,
        Mode::Wave,
        Mode::Dance,
        Mode::Tempo,
        Mode::Flash,
    ];

    /// Get mode from numeric value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::RandomColor),
            1 => Some(Self::Custom),
            2 => Some(Self::Breathe),
            3 => Some(Self::Cycle),
            4 => Some(Self::Wave),
            5 => Some(Self::Dance),
            6 => Some(Self::Tempo),
            7 => Some(Self::Flash),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lowercase description used by the `modedesc` attribute
    pub fn name(self) -> &'static str {
        match self {
            Self::RandomColor => "random",
            Self::Custom => "custom",
            Self::Breathe => "breathe",
            Self::Cycle => "cycle",
            Self::Wave => "wave",
            Self::Dance => "dance",
            Self::Tempo => "tempo",
            Self::Flash => "flash",
        }
    }

    /// Firmware animation driving this mode, `None` for custom
    pub fn animation(self) -> Option<Animation> {
        match self {
            Self::Custom => None,
            Self::RandomColor => Some(Animation::RandomColor),
            Self::Breathe => Some(Animation::Breathe),
            Self::Cycle => Some(Animation::Cycle),
            Self::Wave => Some(Animation::Wave),
            Self::Dance => Some(Animation::Dance),
            Self::Tempo => Some(Animation::Tempo),
            Self::Flash => Some(Animation::Flash),
        }
    }

    /// Match a `modedesc` write against the mode names
    ///
    /// The last input byte is reserved for a line terminator and ignored,
    /// whatever it is; inputs shorter than two bytes never match. The first
    /// mode (in enumeration order) whose name starts with the remaining
    /// bytes wins, so `"cycle\n"`, `"cyc\n"` and even `"cyc"` all select
    /// [`Mode::Cycle`], while `"cycles\n"` matches nothing. Bytes after an
    /// embedded NUL are ignored, as with C string comparison.
    pub fn from_description(input: &[u8]) -> Option<Self> {
        if input.len() < 2 {
            return None;
        }
        let stem = &input[..input.len() - 1];
        Self::ALL
            .into_iter()
            .find(|mode| c_prefix_matches(mode.name().as_bytes(), stem))
    }
}

/// `strncmp(name, stem, stem.len()) == 0`
fn c_prefix_matches(name: &[u8], stem: &[u8]) -> bool {
    match stem.iter().position(|&b| b == 0) {
        Some(nul) => name == &stem[..nul],
        None => name.starts_with(stem),
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Authoritative in-memory lighting model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingState {
    /// One color per region, indexed by [`Region::as_u8`]
    pub colors: [RgbColor; REGION_COUNT],
    pub brightness: u8,
    pub mode: Mode,
}

impl LightingState {
    pub fn color(&self, region: Region) -> RgbColor {
        self.colors[region.as_u8() as usize]
    }
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            colors: [RgbColor::BLUE; REGION_COUNT],
            brightness: BRIGHTNESS_DEFAULT,
            mode: Mode::Custom,
        }
    }
}

/// Palette applied once the firmware interface has been found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupPalette {
    pub left: RgbColor,
    pub center: RgbColor,
    pub right: RgbColor,
    pub brightness: u8,
}

impl StartupPalette {
    pub fn color(&self, region: Region) -> RgbColor {
        match region {
            Region::Left => self.left,
            Region::Center => self.center,
            Region::Right => self.right,
        }
    }
}

impl Default for StartupPalette {
    fn default() -> Self {
        Self {
            left: RgbColor::RED,
            center: RgbColor::GREEN,
            right: RgbColor::BLUE,
            brightness: BRIGHTNESS_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_numbering() {
        for (i, mode) in Mode::ALL.iter().enumerate() {
            assert_eq!(mode.as_u8() as usize, i);
            assert_eq!(Mode::from_u8(i as u8), Some(*mode));
        }
        assert_eq!(Mode::from_u8(8), None);
    }

    #[test]
    fn test_only_custom_lacks_animation() {
        let without: Vec<_> = Mode::ALL
            .iter()
            .filter(|m| m.animation().is_none())
            .collect();
        assert_eq!(without, vec![&Mode::Custom]);
    }

    #[test]
    fn test_description_full_names() {
        for mode in Mode::ALL {
            let input = format!("{}\n", mode.name());
            assert_eq!(Mode::from_description(input.as_bytes()), Some(mode));
        }
    }

    #[test]
    fn test_description_drops_exactly_one_byte() {
        // Without a terminator the last real character is dropped
        assert_eq!(Mode::from_description(b"cycle"), Some(Mode::Cycle));
        assert_eq!(Mode::from_description(b"cyc"), Some(Mode::Cycle));
        assert_eq!(Mode::from_description(b"cyc\n"), Some(Mode::Cycle));
        // Two trailing bytes leave one behind, which no name contains
        assert_eq!(Mode::from_description(b"cycle\n\n"), None);
        assert_eq!(Mode::from_description(b"cycles\n"), None);
    }

    #[test]
    fn test_description_first_match_wins() {
        // "c" prefixes both custom and cycle; custom comes first
        assert_eq!(Mode::from_description(b"c\n"), Some(Mode::Custom));
        assert_eq!(Mode::from_description(b"cu"), Some(Mode::Custom));
        assert_eq!(Mode::from_description(b"t\n"), Some(Mode::Tempo));
    }

    #[test]
    fn test_description_too_short() {
        assert_eq!(Mode::from_description(b""), None);
        assert_eq!(Mode::from_description(b"\n"), None);
        assert_eq!(Mode::from_description(b"w"), None);
    }

    #[test]
    fn test_description_is_case_sensitive() {
        assert_eq!(Mode::from_description(b"Wave\n"), None);
        assert_eq!(Mode::from_description(b"xyz\n"), None);
    }

    #[test]
    fn test_description_embedded_nul() {
        assert_eq!(Mode::from_description(b"wave\0zz\n"), Some(Mode::Wave));
        assert_eq!(Mode::from_description(b"wa\0\n"), None);
    }

    #[test]
    fn test_rgb_packing() {
        assert_eq!(RgbColor::from_packed(0x0000FF), RgbColor::BLUE);
        assert_eq!(RgbColor::new(0x12, 0x34, 0x56).to_packed(), 0x123456);
        assert_eq!(RgbColor::new(10, 20, 30).to_string(), "10 20 30");
    }

    #[test]
    fn test_default_state() {
        let state = LightingState::default();
        assert_eq!(state.colors, [RgbColor::BLUE; 3]);
        assert_eq!(state.brightness, 255);
        assert_eq!(state.mode, Mode::Custom);
    }
}
