//! Keyboard LED error types

use thiserror::Error;

/// Errors from keyboard LED operations
///
/// Firmware failures are not errors here: the state is still committed and
/// they are reported through [`Outcome`](crate::Outcome).
#[derive(Error, Debug)]
pub enum KeyboardError {
    /// Malformed or out-of-range input; nothing was changed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The WMI interface is missing on this machine
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
