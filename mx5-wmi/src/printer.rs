//! PrinterInterface middleware for monitoring firmware traffic
//!
//! Wraps any [`FirmwareInterface`] and prints every opcode (decoded) and the
//! firmware's reply to stderr.
//!
//! # Example
//!
//! ```ignore
//! use mx5_wmi::{AcpiCallInterface, PrinterInterface, PrinterConfig, OpcodeFilter};
//!
//! let backend = Arc::new(AcpiCallInterface::default());
//! let config = PrinterConfig::default().with_filter(OpcodeFilter::Color);
//! let monitored = PrinterInterface::wrap(backend, config);
//! ```

use crossterm::style::Stylize;
use std::str::FromStr;

use crate::command::{try_parse_opcode, CommandKind, ParsedCommand};
use crate::protocol::op;
use crate::{BoxedInterface, FirmwareInterface, InterfaceInfo, WmiError, WmiReply};

/// Opcode filter for selective display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpcodeFilter {
    #[default]
    All,
    Color,
    Brightness,
    Mode,
}

impl FromStr for OpcodeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "color" | "colors" | "colour" => Ok(Self::Color),
            "brightness" | "bright" => Ok(Self::Brightness),
            "mode" | "modes" => Ok(Self::Mode),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

impl OpcodeFilter {
    fn accepts(&self, parsed: &ParsedCommand) -> bool {
        let kind = match parsed {
            ParsedCommand::Known(cmd) => cmd.kind(),
            ParsedCommand::Unknown(_) => return true,
        };
        match self {
            Self::All => true,
            Self::Color => kind == CommandKind::Color,
            Self::Brightness => kind == CommandKind::Brightness,
            Self::Mode => kind == CommandKind::Mode,
        }
    }
}

/// Configuration for the PrinterInterface
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show the raw opcode alongside decoded output
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: OpcodeFilter,
}

impl PrinterConfig {
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    pub fn with_filter(mut self, filter: OpcodeFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Firmware middleware that prints all traffic
pub struct PrinterInterface {
    inner: BoxedInterface,
    config: PrinterConfig,
}

impl PrinterInterface {
    /// Wrap a backend with printing middleware
    pub fn wrap(inner: BoxedInterface, config: PrinterConfig) -> BoxedInterface {
        std::sync::Arc::new(Self { inner, config })
    }

    fn print_request(&self, method_id: u32, arg: u32) -> bool {
        let parsed = try_parse_opcode(arg);
        if !self.config.filter.accepts(&parsed) {
            return false;
        }

        match parsed {
            ParsedCommand::Known(cmd) => {
                eprintln!("{} {}  {}", ">>>".cyan(), "CMD".cyan().bold(), cmd);
            }
            ParsedCommand::Unknown(raw) => {
                eprintln!(
                    "{} {}  {:#010x} {}",
                    ">>>".cyan(),
                    "CMD".cyan().bold(),
                    raw,
                    op::name(raw).yellow()
                );
            }
        }

        if self.config.show_hex {
            eprintln!(
                "    {}  method={:#04x} arg={:#010x}",
                "HEX".dim(),
                method_id,
                arg
            );
        }
        true
    }

    fn print_result(&self, result: &Result<WmiReply, WmiError>) {
        match result {
            Ok(reply) => {
                eprintln!(
                    "{} {}  {:?} (status {:#x})",
                    "<<<".green(),
                    "RSP".green().bold(),
                    reply,
                    reply.status()
                );
            }
            Err(e) => {
                eprintln!("{} {}  {}", "<<<".red(), "ERR".red().bold(), e);
            }
        }
    }
}

impl FirmwareInterface for PrinterInterface {
    fn has_interface(&self, guid: &str) -> bool {
        let present = self.inner.has_interface(guid);
        eprintln!(
            "{} {}  {} {}",
            "???".yellow(),
            "WMI".yellow().bold(),
            guid,
            if present { "present" } else { "absent" }
        );
        present
    }

    fn evaluate(&self, guid: &str, method_id: u32, arg: u32) -> Result<WmiReply, WmiError> {
        let shown = self.print_request(method_id, arg);
        let result = self.inner.evaluate(guid, method_id, arg);
        if shown {
            self.print_result(&result);
        }
        result
    }

    fn info(&self) -> &InterfaceInfo {
        self.inner.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Animation, Command, Region};
    use crate::protocol::MX5R2_GUID;
    use crate::RecordingInterface;
    use std::sync::Arc;

    #[test]
    fn test_opcode_filter_parse() {
        assert_eq!(OpcodeFilter::from_str("all").unwrap(), OpcodeFilter::All);
        assert_eq!(OpcodeFilter::from_str("Color").unwrap(), OpcodeFilter::Color);
        assert_eq!(
            OpcodeFilter::from_str("brightness").unwrap(),
            OpcodeFilter::Brightness
        );
        assert_eq!(OpcodeFilter::from_str("modes").unwrap(), OpcodeFilter::Mode);
        assert!(OpcodeFilter::from_str("cmd=0x10").is_err());
    }

    #[test]
    fn test_filter_accepts() {
        let color = try_parse_opcode(Command::set_color(Region::Left, 1, 2, 3).opcode());
        let wave = try_parse_opcode(Command::Animate(Animation::Wave).opcode());

        assert!(OpcodeFilter::Color.accepts(&color));
        assert!(!OpcodeFilter::Color.accepts(&wave));
        assert!(OpcodeFilter::Mode.accepts(&wave));
        assert!(OpcodeFilter::Brightness.accepts(&ParsedCommand::Unknown(0)));
    }

    #[test]
    fn test_passes_calls_through() {
        let recorder = Arc::new(RecordingInterface::new());
        let printer = PrinterInterface::wrap(recorder.clone(), PrinterConfig::default());

        assert!(printer.has_interface(MX5R2_GUID));
        printer.evaluate(MX5R2_GUID, 0x67, 0x1000_0000).unwrap();
        assert_eq!(recorder.opcodes(), vec![0x1000_0000]);
        assert_eq!(printer.info().description, "memory");
    }
}
