//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (probe, modes, get, status)
//! - `set`: Attribute writes through the daemon
//! - `utility`: Hosts (serve, shell) and config setup

pub mod query;
#[cfg(feature = "dbus")]
pub mod set;
pub mod utility;

use mx5_wmi::{OpcodeFilter, PrinterConfig};
use mx5kbleds::{BackendOptions, DriverConfig};

/// Result type for command handlers
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a handler needs to reach the firmware
pub struct Context {
    pub config: DriverConfig,
    pub backend: BackendOptions,
}

/// Create printer config from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    filter: Option<&str>,
) -> Result<Option<PrinterConfig>, Box<dyn std::error::Error>> {
    if !monitor {
        return Ok(None);
    }

    let filter = match filter {
        Some(f) => std::str::FromStr::from_str(f)?,
        None => OpcodeFilter::All,
    };

    Ok(Some(
        PrinterConfig::default().with_hex(hex).with_filter(filter),
    ))
}
