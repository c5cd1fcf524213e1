//! Action record — an entry in a device's command history.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::id::{ActionId, DeviceId};
use crate::time::{self, Timestamp};

/// Who issued a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSource {
    /// A user clicked a control button.
    #[default]
    Manual,
}

impl ActionSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: ActionId,
    pub device_id: DeviceId,
    pub command: Command,
    pub source: ActionSource,
    pub recorded_at: Timestamp,
}

impl ActionRecord {
    /// A manual command issued now.
    #[must_use]
    pub fn manual(device_id: DeviceId, command: Command) -> Self {
        Self {
            id: ActionId::new(),
            device_id,
            command,
            source: ActionSource::Manual,
            recorded_at: time::now(),
        }
    }
}
