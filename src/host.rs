//! Attribute host plumbing shared by the daemon and the shell
//!
//! Builds the firmware backend from config and CLI flags, brings up the
//! lighting state, and turns text requests into attribute calls.

use std::sync::Arc;

use mx5_keyleds::{Attribute, KeyboardError, KeyboardLeds, Outcome, SyncLeds};
use mx5_wmi::{
    AcpiCallInterface, BoxedInterface, PrinterConfig, PrinterInterface, RecordingInterface,
    WmiChannel,
};
use tracing::{info, warn};

use crate::config::DriverConfig;

/// How to reach the firmware
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    /// Record opcodes in memory instead of calling firmware
    pub dry_run: bool,
    /// Print traffic when set
    pub printer: Option<PrinterConfig>,
}

/// Build the firmware backend described by `config` and `options`
pub fn open_backend(config: &DriverConfig, options: &BackendOptions) -> BoxedInterface {
    let backend: BoxedInterface = if options.dry_run {
        info!("Dry run: opcodes are recorded, not sent");
        Arc::new(RecordingInterface::with_guid(&config.guid))
    } else {
        Arc::new(AcpiCallInterface::new(config.acpi_config()))
    };

    match &options.printer {
        Some(printer) => {
            info!("Monitor mode enabled - printing all firmware traffic");
            PrinterInterface::wrap(backend, printer.clone())
        }
        None => backend,
    }
}

/// Probe the firmware and bring up the lighting state
///
/// Applies the startup palette when enabled. A missing WMI interface is
/// returned as [`KeyboardError::UnsupportedPlatform`].
pub fn start(config: &DriverConfig, options: &BackendOptions) -> Result<SyncLeds, KeyboardError> {
    let channel = WmiChannel::new(open_backend(config, options), config.guid.clone());
    let mut leds = KeyboardLeds::open(channel)?;

    if config.startup.enabled {
        if let Outcome::HardwareFailed {
            failed,
            submitted,
            reason,
        } = leds.initialize(&config.startup.palette())
        {
            warn!("Startup palette: {failed} of {submitted} commands failed ({reason})");
        }
    }

    info!("{} loaded", mx5_wmi::protocol::DRIVER_NAME);
    Ok(SyncLeds::new(leds))
}

/// Bytes handed to an attribute for a text value
///
/// A trailing newline is added when missing, matching what `echo` writes to
/// an attribute file, so `modedesc` sees the terminator it expects.
pub fn attribute_input(value: &str) -> Vec<u8> {
    let mut input = value.as_bytes().to_vec();
    if !value.ends_with('\n') {
        input.push(b'\n');
    }
    input
}

/// Write a text value and report the outcome label
///
/// Labels: `applied`, `rejected` or `hardware-failed`.
pub fn write_attribute(leds: &SyncLeds, attr: Attribute, value: &str) -> &'static str {
    match leds.write(attr, &attribute_input(value)) {
        Ok(outcome) => outcome.label(),
        Err(e) => {
            warn!("{attr}: {e}");
            "rejected"
        }
    }
}

/// All attributes with their current values, newline stripped
pub fn status(leds: &SyncLeds) -> Vec<(String, String)> {
    let guard = leds.lock();
    Attribute::ALL
        .iter()
        .map(|attr| {
            let value = attr.show(&guard);
            (attr.name().to_string(), value.trim_end().to_string())
        })
        .collect()
}

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Read(Attribute),
    Write(Attribute, String),
    Status,
    Quit,
}

/// Parse a shell line: `<attr>`, `<attr> <value>`, `status` or `quit`
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_request(line: &str) -> Result<Option<Request>, KeyboardError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, value) = match line.split_once(char::is_whitespace) {
        Some((name, value)) => (name, Some(value.trim())),
        None => (line, None),
    };

    match (name, value) {
        ("status", None) => return Ok(Some(Request::Status)),
        ("quit" | "exit", None) => return Ok(Some(Request::Quit)),
        _ => {}
    }

    let attr: Attribute = name.parse()?;
    Ok(Some(match value {
        Some(value) => Request::Write(attr, value.to_string()),
        None => Request::Read(attr),
    }))
}

/// Run one shell request, returning the text to print
pub fn execute(leds: &SyncLeds, request: &Request) -> String {
    match request {
        Request::Read(attr) => leds.show(*attr).trim_end().to_string(),
        Request::Write(attr, value) => write_attribute(leds, *attr, value).to_string(),
        Request::Status => status(leds)
            .into_iter()
            .map(|(name, value)| format!("{name:<11} {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Request::Quit => String::new(),
    }
}
