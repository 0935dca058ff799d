//! Firmware command channel for the Eurocom MX5-R2 keyboard backlight
//!
//! This crate owns everything between a lighting intent and the platform
//! firmware:
//!
//! - `command`: the 32-bit opcode encoder (and a decoder for monitoring)
//! - `channel`: the single submit path through WMI method `SET_KB_LED`
//! - backends implementing [`FirmwareInterface`]:
//!   - `AcpiCallInterface` (Linux, `/proc/acpi/call`)
//!   - `RecordingInterface` (in memory, for tests and dry runs)
//! - `PrinterInterface` middleware that prints decoded traffic

pub mod acpi_call;
pub mod channel;
pub mod command;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod recording;
pub mod types;

pub use acpi_call::{AcpiCallConfig, AcpiCallInterface};
pub use channel::WmiChannel;
pub use command::{try_parse_opcode, Animation, Command, CommandKind, ParsedCommand, Region};
pub use error::WmiError;
pub use printer::{OpcodeFilter, PrinterConfig, PrinterInterface};
pub use recording::RecordingInterface;
pub use types::{BackendType, InterfaceInfo, WmiReply};

use std::sync::Arc;

/// The firmware boundary - all backends implement this
///
/// Calls are blocking and carry no timeout; a backend either returns the
/// method's reply or reports that the call itself failed.
pub trait FirmwareInterface: Send + Sync {
    /// Check whether the WMI interface identified by `guid` exists
    fn has_interface(&self, guid: &str) -> bool;

    /// Evaluate a WMI method
    ///
    /// # Arguments
    /// * `guid` - WMI interface GUID
    /// * `method_id` - Method number (e.g., `protocol::SET_KB_LED`)
    /// * `arg` - 32-bit argument, passed to firmware as a 4-byte buffer
    fn evaluate(&self, guid: &str, method_id: u32, arg: u32) -> Result<WmiReply, WmiError>;

    /// Get backend information
    fn info(&self) -> &InterfaceInfo;
}

/// Type alias for a shared firmware backend
pub type BoxedInterface = Arc<dyn FirmwareInterface>;
