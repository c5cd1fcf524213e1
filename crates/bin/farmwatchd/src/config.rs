//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `farmwatch.toml` in the working directory (or the file named by
//! `FARMWATCH_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use farmwatch_adapter_mqtt::MqttConfig;
use farmwatch_domain::device::{Device, DeviceKind};
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::farm::Farm;

const DEFAULT_CONFIG_PATH: &str = "farmwatch.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Command broker settings.
    pub mqtt: MqttConfig,
    /// Farms shown on the overview page.
    pub farms: Vec<Farm>,
    /// Devices provisioned on every start.
    pub devices: Vec<DeviceSeed>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Directory served under `/static` (stylesheet and the dashboard script).
    pub static_dir: PathBuf,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// A device declared in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSeed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: DeviceKind,
    pub topic: String,
    #[serde(default)]
    pub farm: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DeviceSeed {
    fn to_device(&self) -> Result<Device, FarmwatchError> {
        let mut builder = Device::builder()
            .id(self.id.as_str())
            .name(self.name.as_str())
            .kind(self.kind)
            .topic(self.topic.as_str());
        if let Some(farm) = &self.farm {
            builder = builder.farm(farm.as_str());
        }
        if let Some(description) = &self.description {
            builder = builder.description(description.as_str());
        }
        builder.build()
    }
}

impl Config {
    /// Load configuration from `farmwatch.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("FARMWATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FARMWATCH_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("FARMWATCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("FARMWATCH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("FARMWATCH_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("FARMWATCH_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("FARMWATCH_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Ok(val) = std::env::var("FARMWATCH_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.broker_port = port;
            }
        }
        if let Ok(val) = std::env::var("FARMWATCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "mqtt broker port must be non-zero".to_string(),
            ));
        }
        for farm in &self.farms {
            farm.validate()
                .map_err(|err| ConfigError::Farm(farm.name.clone(), err))?;
        }
        self.seed_devices()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Devices declared in the file, validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Device`] for the first invalid entry.
    pub fn seed_devices(&self) -> Result<Vec<Device>, ConfigError> {
        self.devices
            .iter()
            .map(|seed| {
                seed.to_device()
                    .map_err(|err| ConfigError::Device(seed.id.clone(), err))
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:farmwatch.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "farmwatchd=info,farmwatch=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A `[[farms]]` entry is invalid.
    #[error("invalid farm {0:?}")]
    Farm(String, #[source] FarmwatchError),
    /// A `[[devices]]` entry is invalid.
    #[error("invalid device {0:?}")]
    Device(String, #[source] FarmwatchError),
}
