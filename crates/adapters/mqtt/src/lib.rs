//! # farmwatch-adapter-mqtt
//!
//! MQTT adapter — hands device commands to the broker.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive
//! - Implement [`CommandPublisher`]: publish each [`ControlMessage`] as JSON
//!   to the device's topic with QoS 1
//!
//! ## Dependency rule
//! Same as other adapters: depends on `farmwatch-app` and `farmwatch-domain`.

mod config;
mod error;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};

use farmwatch_app::ports::CommandPublisher;
use farmwatch_domain::control::ControlMessage;
use farmwatch_domain::error::FarmwatchError;

pub use config::MqttConfig;
pub use error::MqttError;

/// Publishes control messages through a rumqttc client.
///
/// The connection is driven by a background task; publishing while the broker
/// is unreachable fails immediately instead of queueing.
#[derive(Clone)]
pub struct MqttCommandPublisher {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
}

impl MqttCommandPublisher {
    /// Create the client and spawn its event loop on the current runtime.
    ///
    /// Returns before the connection is established.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(config.keep_alive());
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, config.capacity);
        let connected = Arc::new(AtomicBool::new(false));
        tokio::spawn(drive(eventloop, Arc::clone(&connected), config.reconnect_delay()));

        tracing::info!(
            broker = %format!("{}:{}", config.broker_host, config.broker_port),
            client_id = %config.client_id,
            "MQTT publisher created"
        );
        Self { client, connected }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn send(&self, topic: &str, message: &ControlMessage) -> Result<(), MqttError> {
        if !self.is_connected() {
            return Err(MqttError::NotConnected);
        }
        let payload = encode(message)?;
        self.client
            .try_publish(topic, QoS::AtLeastOnce, false, payload)
            .map_err(MqttError::Client)
    }
}

fn encode(message: &ControlMessage) -> Result<Vec<u8>, MqttError> {
    serde_json::to_vec(message).map_err(MqttError::Payload)
}

async fn drive(mut eventloop: EventLoop, connected: Arc<AtomicBool>, reconnect_delay: Duration) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                connected.store(true, Ordering::Relaxed);
                tracing::info!("connected to MQTT broker");
            }
            Ok(Event::Incoming(Packet::PubAck(ack))) => {
                tracing::debug!(pkid = ack.pkid, "command acknowledged by broker");
            }
            Ok(_) => {}
            Err(err) => {
                if connected.swap(false, Ordering::Relaxed) {
                    tracing::warn!(error = %err, "lost MQTT broker connection");
                } else {
                    tracing::debug!(error = %err, "MQTT broker unreachable");
                }
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

impl CommandPublisher for MqttCommandPublisher {
    fn publish(
        &self,
        topic: &str,
        message: &ControlMessage,
    ) -> impl Future<Output = Result<(), FarmwatchError>> + Send {
        let result = self.send(topic, message).map_err(FarmwatchError::from);
        if result.is_ok() {
            tracing::debug!(topic, command = %message.command, "command queued for broker");
        }
        async move { result }
    }
}
