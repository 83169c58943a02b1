// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler's typed command representation and its conversion from the
//! wire type.

use corvid_proto::{pb, SERIAL_NUMBER_KEY};

use crate::error::SchedulerError;

/// A command deserialized from a wire `pb::Command`.
///
/// The kind space is open: executors register themselves under whatever
/// kind string they handle, so this crate does not enumerate known kinds.
/// An executor-not-found at dispatch time is how an unrecognized command
/// kind is handled; `TryFrom` only rejects structurally malformed wire
/// commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: String,
    pub serial: String,
    /// All `args` pairs except the reserved `SerialNumber` key, in wire order.
    pub args: Vec<(String, String)>,
}

impl Command {
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

impl TryFrom<pb::Command> for Command {
    type Error = SchedulerError;

    fn try_from(value: pb::Command) -> Result<Self, Self::Error> {
        let mut serial = None;
        let mut args = Vec::with_capacity(value.args.len());
        for pair in value.args {
            if pair.key == SERIAL_NUMBER_KEY {
                serial = Some(pair.value);
            } else {
                args.push((pair.key, pair.value));
            }
        }
        let serial = serial.ok_or_else(|| SchedulerError::MissingSerialNumber(value.command.clone()))?;
        Ok(Command { kind: value.command, serial, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> pb::KeyStringValuePair {
        pb::KeyStringValuePair { key: k.to_string(), value: v.to_string() }
    }

    #[test]
    fn converts_a_well_formed_wire_command() {
        let wire = pb::Command {
            command: "ConfigurationDiscoveryCommand".to_string(),
            args: vec![pair("SerialNumber", "s1"), pair("UUID", "u1"), pair("k1", "v1")],
        };
        let cmd = Command::try_from(wire).unwrap();
        assert_eq!(cmd.kind, "ConfigurationDiscoveryCommand");
        assert_eq!(cmd.serial, "s1");
        assert_eq!(cmd.arg("UUID"), Some("u1"));
        assert_eq!(cmd.arg("k1"), Some("v1"));
        assert_eq!(cmd.arg("SerialNumber"), None);
    }

    #[test]
    fn missing_serial_number_is_rejected() {
        let wire = pb::Command { command: "X".to_string(), args: vec![pair("k1", "v1")] };
        let err = Command::try_from(wire).unwrap_err();
        assert!(matches!(err, SchedulerError::MissingSerialNumber(k) if k == "X"));
    }
}
