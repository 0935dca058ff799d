//! In-memory firmware backend
//!
//! Records every evaluation instead of touching hardware. Used by the test
//! suites and by `--dry-run`.

use parking_lot::Mutex;

use crate::command::{try_parse_opcode, ParsedCommand};
use crate::error::WmiError;
use crate::protocol;
use crate::types::{BackendType, InterfaceInfo, WmiReply};
use crate::FirmwareInterface;

/// One recorded `evaluate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub guid: String,
    pub method_id: u32,
    pub arg: u32,
    /// Whether the call was failed by injection
    pub failed: bool,
}

struct RecorderState {
    calls: Vec<RecordedCall>,
    reply: WmiReply,
    present: bool,
    fail_remaining: usize,
    fail_always: bool,
}

/// Firmware backend that records opcodes in memory
pub struct RecordingInterface {
    guid: String,
    info: InterfaceInfo,
    state: Mutex<RecorderState>,
}

impl Default for RecordingInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingInterface {
    /// Create a recorder answering to the MX5-R2 GUID
    pub fn new() -> Self {
        Self::with_guid(protocol::MX5R2_GUID)
    }

    /// Create a recorder answering to a specific GUID
    pub fn with_guid(guid: &str) -> Self {
        Self {
            guid: guid.to_string(),
            info: InterfaceInfo {
                backend: BackendType::Recording,
                description: "memory".to_string(),
            },
            state: Mutex::new(RecorderState {
                calls: Vec::new(),
                reply: WmiReply::Integer(0),
                present: true,
                fail_remaining: 0,
                fail_always: false,
            }),
        }
    }

    /// All recorded calls, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    /// Arguments of all recorded calls, oldest first
    pub fn opcodes(&self) -> Vec<u32> {
        self.state.lock().calls.iter().map(|c| c.arg).collect()
    }

    /// Recorded calls decoded back into commands
    pub fn commands(&self) -> Vec<ParsedCommand> {
        self.opcodes().into_iter().map(try_parse_opcode).collect()
    }

    /// Forget all recorded calls
    pub fn clear(&self) {
        self.state.lock().calls.clear();
    }

    /// Reply returned by subsequent evaluations
    pub fn set_reply(&self, reply: WmiReply) {
        self.state.lock().reply = reply;
    }

    /// Toggle whether the interface is reported as present
    pub fn set_present(&self, present: bool) {
        self.state.lock().present = present;
    }

    /// Fail the next `count` evaluations
    pub fn fail_next(&self, count: usize) {
        self.state.lock().fail_remaining = count;
    }

    /// Fail every evaluation until turned off
    pub fn fail_always(&self, fail: bool) {
        self.state.lock().fail_always = fail;
    }
}

impl FirmwareInterface for RecordingInterface {
    fn has_interface(&self, guid: &str) -> bool {
        self.state.lock().present && guid.eq_ignore_ascii_case(&self.guid)
    }

    fn evaluate(&self, guid: &str, method_id: u32, arg: u32) -> Result<WmiReply, WmiError> {
        let mut state = self.state.lock();
        if !state.present || !guid.eq_ignore_ascii_case(&self.guid) {
            return Err(WmiError::InterfaceNotFound(guid.to_string()));
        }

        let failed = if state.fail_always {
            true
        } else if state.fail_remaining > 0 {
            state.fail_remaining -= 1;
            true
        } else {
            false
        };

        state.calls.push(RecordedCall {
            guid: guid.to_string(),
            method_id,
            arg,
            failed,
        });

        if failed {
            Err(WmiError::AcpiFailure("AE_ERROR (injected)".to_string()))
        } else {
            Ok(state.reply.clone())
        }
    }

    fn info(&self) -> &InterfaceInfo {
        &self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_failed_calls() {
        let rec = RecordingInterface::new();
        rec.fail_next(1);
        assert!(rec.evaluate(protocol::MX5R2_GUID, 0x67, 1).is_err());
        assert!(rec.evaluate(protocol::MX5R2_GUID, 0x67, 2).is_ok());

        let calls = rec.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].failed);
        assert!(!calls[1].failed);
    }

    #[test]
    fn test_guid_case_insensitive() {
        let rec = RecordingInterface::new();
        assert!(rec.has_interface(&protocol::MX5R2_GUID.to_lowercase()));
    }

    #[test]
    fn test_absent_interface_rejects_calls() {
        let rec = RecordingInterface::new();
        rec.set_present(false);
        assert!(matches!(
            rec.evaluate(protocol::MX5R2_GUID, 0x67, 0),
            Err(WmiError::InterfaceNotFound(_))
        ));
        assert!(rec.calls().is_empty());
    }
}
