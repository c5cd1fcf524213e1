//! MQTT adapter error types.

use farmwatch_domain::error::FarmwatchError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// No broker connection is established.
    #[error("MQTT broker not connected")]
    NotConnected,

    /// The rumqttc client refused the request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The control message could not be encoded.
    #[error("failed to encode MQTT payload")]
    Payload(#[source] serde_json::Error),
}

impl From<MqttError> for FarmwatchError {
    fn from(err: MqttError) -> Self {
        Self::Publish(Box::new(err))
    }
}
