//! Linux backend using the `acpi_call` kernel module
//!
//! Presence is checked against the WMI bus in sysfs; methods are evaluated by
//! writing a call line to `/proc/acpi/call` and reading the result back.
//!
//! Request format: `<method path> <instance> <method id> b<arg bytes>`, where
//! the 32-bit argument is passed as a 4-byte little-endian buffer, exactly as
//! the kernel's `wmi_evaluate_method` would hand it to `WMBB`.

use std::fs;
use std::path::PathBuf;

use tracing::trace;

use crate::error::WmiError;
use crate::protocol;
use crate::types::{BackendType, InterfaceInfo, WmiReply};
use crate::FirmwareInterface;

/// Default location of the acpi_call interface
pub const DEFAULT_CALL_PATH: &str = "/proc/acpi/call";

/// Default sysfs directory listing WMI devices
pub const DEFAULT_WMI_DEVICES_DIR: &str = "/sys/bus/wmi/devices";

/// Default ACPI path of the `WMBB` method
pub const DEFAULT_METHOD_PATH: &str = "\\_SB.WMI.WMBB";

/// Paths used by [`AcpiCallInterface`]
#[derive(Debug, Clone)]
pub struct AcpiCallConfig {
    pub call_path: PathBuf,
    pub wmi_devices_dir: PathBuf,
    pub method_path: String,
}

impl Default for AcpiCallConfig {
    fn default() -> Self {
        Self {
            call_path: PathBuf::from(DEFAULT_CALL_PATH),
            wmi_devices_dir: PathBuf::from(DEFAULT_WMI_DEVICES_DIR),
            method_path: DEFAULT_METHOD_PATH.to_string(),
        }
    }
}

/// Firmware backend talking to `/proc/acpi/call`
pub struct AcpiCallInterface {
    config: AcpiCallConfig,
    info: InterfaceInfo,
}

impl AcpiCallInterface {
    pub fn new(config: AcpiCallConfig) -> Self {
        let info = InterfaceInfo {
            backend: BackendType::AcpiCall,
            description: format!("{} via {}", config.method_path, config.call_path.display()),
        };
        Self { config, info }
    }

    pub fn config(&self) -> &AcpiCallConfig {
        &self.config
    }
}

impl Default for AcpiCallInterface {
    fn default() -> Self {
        Self::new(AcpiCallConfig::default())
    }
}

impl FirmwareInterface for AcpiCallInterface {
    fn has_interface(&self, guid: &str) -> bool {
        let entries = match fs::read_dir(&self.config.wmi_devices_dir) {
            Ok(entries) => entries,
            Err(e) => {
                trace!(
                    "cannot list {}: {}",
                    self.config.wmi_devices_dir.display(),
                    e
                );
                return false;
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .any(|entry| matches_guid(&entry.file_name().to_string_lossy(), guid))
    }

    fn evaluate(&self, guid: &str, method_id: u32, arg: u32) -> Result<WmiReply, WmiError> {
        let request = format_request(
            &self.config.method_path,
            protocol::WMI_INSTANCE,
            method_id,
            arg,
        );
        trace!("{guid}: {request}");

        fs::write(&self.config.call_path, &request)?;
        let raw = fs::read_to_string(&self.config.call_path)?;
        parse_reply(&raw)
    }

    fn info(&self) -> &InterfaceInfo {
        &self.info
    }
}

/// Check whether a WMI device name belongs to `guid`
///
/// The kernel names devices after the GUID, with a `-N` suffix when the
/// GUID appears more than once.
fn matches_guid(name: &str, guid: &str) -> bool {
    match name.get(..guid.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(guid) => {
            let rest = &name[guid.len()..];
            rest.is_empty() || rest.starts_with('-')
        }
        _ => false,
    }
}

/// Build an acpi_call request line
pub fn format_request(method_path: &str, instance: u32, method_id: u32, arg: u32) -> String {
    let buffer: String = arg.to_le_bytes().iter().map(|b| format!("{b:02x}")).collect();
    format!("{method_path} {instance:#x} {method_id:#x} b{buffer}")
}

/// Parse the text acpi_call leaves behind after a call
pub fn parse_reply(raw: &str) -> Result<WmiReply, WmiError> {
    let text = raw.trim_matches(|c: char| c == '\0' || c.is_whitespace());

    if text.is_empty() || text == "not called" {
        return Ok(WmiReply::None);
    }
    if let Some(reason) = text.strip_prefix("Error:") {
        return Err(WmiError::AcpiFailure(reason.trim().to_string()));
    }
    if let Some(hex) = text.strip_prefix("0x") {
        if let Ok(value) = u64::from_str_radix(hex, 16) {
            return Ok(WmiReply::Integer(value));
        }
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Ok(WmiReply::String(text[1..text.len() - 1].to_string()));
    }
    if (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'))
    {
        if let Some(bytes) = parse_buffer(&text[1..text.len() - 1]) {
            return Ok(WmiReply::Buffer(bytes));
        }
    }

    Ok(WmiReply::String(text.to_string()))
}

fn parse_buffer(inner: &str) -> Option<Vec<u8>> {
    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| u8::from_str_radix(s.strip_prefix("0x").unwrap_or(s), 16).ok())
        .collect()
}
