//! MQTT broker configuration.

use std::time::Duration;

use serde::Deserialize;

/// Connection settings for the command broker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause before reconnecting after a connection error, in seconds.
    pub reconnect_delay_secs: u16,
    /// Number of outgoing requests buffered while the connection is busy.
    pub capacity: usize,
}

impl MqttConfig {
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reconnect_delay_secs))
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "farmwatch".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            capacity: 10,
        }
    }
}
