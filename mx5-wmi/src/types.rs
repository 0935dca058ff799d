//! Common types for the firmware channel

/// Backend kind behind a [`FirmwareInterface`](crate::FirmwareInterface)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// `/proc/acpi/call` via the acpi_call kernel module
    AcpiCall,
    /// In-memory recorder, nothing reaches hardware
    Recording,
}

impl BackendType {
    /// Check if commands from this backend reach real firmware
    pub fn is_hardware(&self) -> bool {
        matches!(self, Self::AcpiCall)
    }
}

/// Backend identification information
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Backend kind
    pub backend: BackendType,
    /// Human-readable location (ACPI method path, "memory", ...)
    pub description: String,
}

/// Value returned by a WMI method evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WmiReply {
    Integer(u64),
    Buffer(Vec<u8>),
    String(String),
    /// Method returned nothing
    None,
}

impl WmiReply {
    /// Status word as seen by the driver: integers pass through, anything
    /// else reads as 0
    pub fn status(&self) -> u32 {
        match self {
            Self::Integer(value) => *value as u32,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_status() {
        assert_eq!(WmiReply::Integer(7).status(), 7);
        assert_eq!(WmiReply::Integer(0x1_0000_0002).status(), 2);
        assert_eq!(WmiReply::Buffer(vec![1, 2]).status(), 0);
        assert_eq!(WmiReply::String("ok".into()).status(), 0);
        assert_eq!(WmiReply::None.status(), 0);
    }
}
