//! The single submit path to firmware

use tracing::{debug, error};

use crate::command::Command;
use crate::error::WmiError;
use crate::protocol::{self, op};
use crate::types::InterfaceInfo;
use crate::BoxedInterface;

/// Sends encoded commands through `SET_KB_LED` on one WMI interface
#[derive(Clone)]
pub struct WmiChannel {
    firmware: BoxedInterface,
    guid: String,
}

impl WmiChannel {
    /// Create a channel for the given interface GUID
    pub fn new(firmware: BoxedInterface, guid: impl Into<String>) -> Self {
        Self {
            firmware,
            guid: guid.into(),
        }
    }

    /// Create a channel for the MX5-R2 interface
    pub fn mx5r2(firmware: BoxedInterface) -> Self {
        Self::new(firmware, protocol::MX5R2_GUID)
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Get backend information
    pub fn info(&self) -> &InterfaceInfo {
        self.firmware.info()
    }

    /// Check that the WMI interface is present
    pub fn probe(&self) -> bool {
        self.firmware.has_interface(&self.guid)
    }

    /// Encode and submit a command
    ///
    /// Returns the firmware status (0 when the reply is not an integer).
    pub fn submit(&self, cmd: &Command) -> Result<u32, WmiError> {
        self.submit_raw(cmd.opcode())
    }

    /// Submit a raw opcode
    pub fn submit_raw(&self, opcode: u32) -> Result<u32, WmiError> {
        debug!(
            "called {:#04x} with arg {:#010x} ({})",
            protocol::SET_KB_LED,
            opcode,
            op::name(opcode)
        );

        match self
            .firmware
            .evaluate(&self.guid, protocol::SET_KB_LED, opcode)
        {
            Ok(reply) => {
                let status = reply.status();
                debug!(
                    "called {:#04x} with arg {:#010x}. Returned: {:#010x}",
                    protocol::SET_KB_LED,
                    opcode,
                    status
                );
                Ok(status)
            }
            Err(e) => {
                error!(
                    "called {:#04x} with arg {:#010x} failed: {}",
                    protocol::SET_KB_LED,
                    opcode,
                    e
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Animation, Region};
    use crate::recording::RecordingInterface;
    use crate::types::WmiReply;
    use std::sync::Arc;

    #[test]
    fn test_submit_records_opcode() {
        let recorder = Arc::new(RecordingInterface::new());
        let channel = WmiChannel::mx5r2(recorder.clone());

        channel
            .submit(&Command::set_color(Region::Left, 255, 0, 0))
            .unwrap();
        channel.submit(&Command::Animate(Animation::Wave)).unwrap();

        assert_eq!(recorder.opcodes(), vec![0xF000_FF00, 0xB000_0000]);
        let calls = recorder.calls();
        assert_eq!(calls[0].guid, protocol::MX5R2_GUID);
        assert_eq!(calls[0].method_id, 0x67);
    }

    #[test]
    fn test_status_defaults_to_zero_for_non_integer() {
        let recorder = Arc::new(RecordingInterface::new());
        let channel = WmiChannel::mx5r2(recorder.clone());

        recorder.set_reply(WmiReply::Buffer(vec![0xAA]));
        assert_eq!(channel.submit(&Command::ResetMode).unwrap(), 0);

        recorder.set_reply(WmiReply::Integer(5));
        assert_eq!(channel.submit(&Command::ResetMode).unwrap(), 5);
    }

    #[test]
    fn test_failure_is_reported() {
        let recorder = Arc::new(RecordingInterface::new());
        let channel = WmiChannel::mx5r2(recorder.clone());

        recorder.fail_next(1);
        assert!(channel.submit(&Command::SetBrightness(3)).is_err());
        assert!(channel.submit(&Command::SetBrightness(3)).is_ok());
    }

    #[test]
    fn test_probe_uses_channel_guid() {
        let recorder = Arc::new(RecordingInterface::new());
        assert!(WmiChannel::mx5r2(recorder.clone()).probe());
        assert!(!WmiChannel::new(recorder.clone(), "0000").probe());

        recorder.set_present(false);
        assert!(!WmiChannel::mx5r2(recorder).probe());
    }
}
