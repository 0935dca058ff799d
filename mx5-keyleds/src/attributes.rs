//! Text attribute endpoints
//!
//! Six named endpoints expose the lighting state as short text values, the
//! same shape a sysfs LED attribute group would have: colors as `"R G B\n"`,
//! brightness and mode as decimal numbers, and `modedesc` as the mode name.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use tracing::warn;

use crate::error::KeyboardError;
use crate::led::{Mode, RgbColor};
use crate::{KeyboardLeds, Outcome};
use mx5_wmi::Region;

/// A named lighting attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Center,
    Right,
    Brightness,
    Mode,
    ModeDesc,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Left,
        Attribute::Center,
        Attribute::Right,
        Attribute::Brightness,
        Attribute::Mode,
        Attribute::ModeDesc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Brightness => "brightness",
            Self::Mode => "mode",
            Self::ModeDesc => "modedesc",
        }
    }

    /// Region backing a color attribute
    pub fn region(self) -> Option<Region> {
        match self {
            Self::Left => Some(Region::Left),
            Self::Center => Some(Region::Center),
            Self::Right => Some(Region::Right),
            _ => None,
        }
    }

    /// Render the current value, newline terminated
    pub fn show(self, leds: &KeyboardLeds) -> String {
        match self {
            Self::Left => format!("{}\n", leds.color(Region::Left)),
            Self::Center => format!("{}\n", leds.color(Region::Center)),
            Self::Right => format!("{}\n", leds.color(Region::Right)),
            Self::Brightness => format!("{}\n", leds.brightness()),
            Self::Mode => format!("{}\n", leds.mode().as_u8()),
            Self::ModeDesc => format!("{}\n", leds.mode().name()),
        }
    }

    /// Parse `input` and apply it
    ///
    /// Rejected input leaves the state untouched and submits nothing.
    pub fn write(self, leds: &mut KeyboardLeds, input: &[u8]) -> Result<Outcome, KeyboardError> {
        match self {
            Self::Left => write_color(leds, Region::Left, input),
            Self::Center => write_color(leds, Region::Center, input),
            Self::Right => write_color(leds, Region::Right, input),
            Self::Brightness => {
                let [value] = parse_integers::<1>(input)?;
                Ok(leds.set_brightness(value))
            }
            Self::Mode => {
                let [value] = parse_integers::<1>(input)?;
                let index = u8::try_from(value).map_err(|_| {
                    KeyboardError::InvalidInput(format!("mode {value} out of range 0-7"))
                })?;
                leds.set_mode(index)
            }
            Self::ModeDesc => {
                let mode = Mode::from_description(input).ok_or_else(|| {
                    KeyboardError::InvalidInput(format!(
                        "no mode matches {:?}",
                        String::from_utf8_lossy(input)
                    ))
                })?;
                Ok(leds.set_mode_to(mode))
            }
        }
    }

    /// Write with store semantics: report bytes consumed, never fail
    ///
    /// Everything is consumed except a `modedesc` write shorter than two
    /// bytes, which consumes nothing. Rejections and firmware failures are
    /// only logged.
    pub fn store(self, leds: &mut KeyboardLeds, input: &[u8]) -> usize {
        if self == Self::ModeDesc && input.len() < 2 {
            warn!("{}: input too short", self);
            return 0;
        }
        match self.write(leds, input) {
            Ok(Outcome::Applied) => {}
            Ok(outcome @ Outcome::HardwareFailed { .. }) => {
                warn!("{}: {:?}", self, outcome);
            }
            Err(e) => warn!("{}: {}", self, e),
        }
        input.len()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = KeyboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| KeyboardError::InvalidInput(format!("unknown attribute '{s}'")))
    }
}

/// Parse exactly `N` whitespace-separated decimal integers
///
/// Values beyond the `i64` range saturate, so an oversized brightness still
/// clamps. Any other malformed token, including trailing junk such as
/// `12abc`, rejects the whole write.
fn parse_integers<const N: usize>(input: &[u8]) -> Result<[i64; N], KeyboardError> {
    let text = std::str::from_utf8(input)
        .map_err(|_| KeyboardError::InvalidInput("input is not UTF-8".to_string()))?;
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != N {
        return Err(KeyboardError::InvalidInput(format!(
            "expected {N} value(s), got {}",
            tokens.len()
        )));
    }

    let mut values = [0i64; N];
    for (slot, token) in values.iter_mut().zip(tokens) {
        *slot = parse_saturating(token)?;
    }
    Ok(values)
}

fn parse_saturating(token: &str) -> Result<i64, KeyboardError> {
    match token.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(KeyboardError::InvalidInput(format!("'{token}' is not a number"))),
        },
    }
}

fn write_color(
    leds: &mut KeyboardLeds,
    region: Region,
    input: &[u8],
) -> Result<Outcome, KeyboardError> {
    let color = parse_color(input)?;
    Ok(leds.write_region_color(region, color))
}

fn parse_color(input: &[u8]) -> Result<RgbColor, KeyboardError> {
    let [r, g, b] = parse_integers::<3>(input)?;
    let channel = |v: i64| {
        u8::try_from(v)
            .map_err(|_| KeyboardError::InvalidInput(format!("channel {v} out of range 0-255")))
    };
    Ok(RgbColor::new(channel(r)?, channel(g)?, channel(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_roundtrip() {
        for attr in Attribute::ALL {
            assert_eq!(attr.name().parse::<Attribute>().unwrap(), attr);
        }
        assert!("Left".parse::<Attribute>().is_err());
        assert!("colour".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color(b"10 20 30\n").unwrap(), RgbColor::new(10, 20, 30));
        assert_eq!(parse_color(b"  0\t255 7").unwrap(), RgbColor::new(0, 255, 7));
    }

    #[test]
    fn test_parse_color_rejects() {
        assert!(parse_color(b"10 20\n").is_err());
        assert!(parse_color(b"10 20 30 40\n").is_err());
        assert!(parse_color(b"10 20 256\n").is_err());
        assert!(parse_color(b"-1 20 30\n").is_err());
        assert!(parse_color(b"red green blue\n").is_err());
        assert!(parse_color(b"0x10 0 0\n").is_err());
        assert!(parse_color(&[0xff, 0xfe, b' ', b'1']).is_err());
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_integers::<1>(b"-40\n").unwrap(), [-40]);
        assert_eq!(parse_integers::<1>(b"99999\n").unwrap(), [99999]);
        assert!(parse_integers::<1>(b"abc\n").is_err());
        assert!(parse_integers::<1>(b"\n").is_err());
        assert!(parse_integers::<1>(b"1 2\n").is_err());
        assert!(parse_integers::<1>(b"12 34\n").is_err());
        assert!(parse_integers::<1>(b"12abc\n").is_err());
        assert!(parse_integers::<1>(b"12.5\n").is_err());
    }

    #[test]
    fn test_parse_integers_saturates() {
        assert_eq!(
            parse_integers::<1>(b"99999999999999999999\n").unwrap(),
            [i64::MAX]
        );
        assert_eq!(
            parse_integers::<1>(b"-99999999999999999999\n").unwrap(),
            [i64::MIN]
        );
        assert!(parse_color(b"99999999999999999999 0 0\n").is_err());
    }
}
