//! Firmware channel error types

use thiserror::Error;

/// Errors that can occur while talking to the WMI firmware interface
///
/// These describe failures of the call itself. A status code returned by
/// firmware is never an error at this layer.
#[derive(Error, Debug)]
pub enum WmiError {
    #[error("WMI interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("ACPI evaluation failed: {0}")]
    AcpiFailure(String),

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for WmiError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => WmiError::InterfaceNotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => WmiError::PermissionDenied(e.to_string()),
            _ => WmiError::Io(e),
        }
    }
}
