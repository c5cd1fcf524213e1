//! Device — a sensor or actuator reachable through a message topic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::{FarmwatchError, ValidationError};
use crate::id::DeviceId;

/// What a device does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    #[default]
    Sensor,
    Actuator,
}

impl DeviceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Actuator => "actuator",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sensor" => Ok(Self::Sensor),
            "actuator" => Ok(Self::Actuator),
            other => Err(ValidationError::UnknownDeviceKind(other.to_string())),
        }
    }
}

/// Last commanded power state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    /// The command that leads to this state.
    #[must_use]
    pub fn command(self) -> Command {
        match self {
            Self::On => Command::On,
            Self::Off => Command::Off,
        }
    }
}

impl From<Command> for PowerState {
    fn from(command: Command) -> Self {
        match command {
            Command::On => Self::On,
            Command::Off => Self::Off,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Command>().map(Self::from)
    }
}

/// A provisioned device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    /// Broker topic that receives this device's commands.
    pub topic: String,
    /// Name of the farm the device is installed on.
    pub farm: Option<String>,
    pub description: Option<String>,
    pub status: PowerState,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::Validation`] when the id, name, or topic is
    /// empty, or when the id holds a character outside `[A-Za-z0-9_-]`. The id
    /// is embedded unescaped in page routes and element ids.
    pub fn validate(&self) -> Result<(), FarmwatchError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyDeviceId.into());
        }
        if !is_routable_id(self.id.as_str()) {
            return Err(ValidationError::InvalidDeviceId(self.id.to_string()).into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.topic.is_empty() {
            return Err(ValidationError::EmptyTopic.into());
        }
        Ok(())
    }

    /// Whether the device accepts on/off commands.
    #[must_use]
    pub fn is_controllable(&self) -> bool {
        self.kind == DeviceKind::Actuator
    }
}

fn is_routable_id(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    kind: DeviceKind,
    topic: Option<String>,
    farm: Option<String>,
    description: Option<String>,
    status: PowerState,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn farm(mut self, farm: impl Into<String>) -> Self {
        self.farm = Some(farm.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: PowerState) -> Self {
        self.status = status;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::Validation`] if the id, name, or topic is
    /// missing or empty.
    pub fn build(self) -> Result<Device, FarmwatchError> {
        let device = Device {
            id: self.id.unwrap_or_else(|| DeviceId::new("")),
            name: self.name.unwrap_or_default(),
            kind: self.kind,
            topic: self.topic.unwrap_or_default(),
            farm: self.farm,
            description: self.description,
            status: self.status,
        };
        device.validate()?;
        Ok(device)
    }
}
