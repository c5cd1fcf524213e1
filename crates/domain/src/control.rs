//! Device control contract shared by the server and the browser.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::id::DeviceId;
use crate::time::Timestamp;

/// Body of the `GET /device/{id}/control/{command}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub success: bool,
    pub message: String,
}

impl ControlResponse {
    /// The command reached the broker.
    #[must_use]
    pub fn sent(command: Command) -> Self {
        Self {
            success: true,
            message: format!("Command {command} sent successfully!"),
        }
    }

    /// The request was understood but could not be carried out.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn device_not_found() -> Self {
        Self::failure("Device not found!")
    }
}

/// Payload published to a device's topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMessage {
    pub device_id: DeviceId,
    pub command: Command,
    pub timestamp: Timestamp,
}

/// Request path for a control call. Both segments are embedded as-is.
#[must_use]
pub fn control_path(device_id: &DeviceId, command: Command) -> String {
    format!("/device/{device_id}/control/{command}")
}
