//! Command publisher port — delivers control messages to devices.

use std::future::Future;
use std::sync::Arc;

use farmwatch_domain::control::ControlMessage;
use farmwatch_domain::error::FarmwatchError;

/// Hands a [`ControlMessage`] to the message broker the devices listen on.
pub trait CommandPublisher {
    /// Publish `message` on `topic`.
    ///
    /// Resolves once the broker client accepted the message; delivery to the
    /// device itself is not confirmed.
    fn publish(
        &self,
        topic: &str,
        message: &ControlMessage,
    ) -> impl Future<Output = Result<(), FarmwatchError>> + Send;
}

impl<T: CommandPublisher + Send + Sync> CommandPublisher for Arc<T> {
    fn publish(
        &self,
        topic: &str,
        message: &ControlMessage,
    ) -> impl Future<Output = Result<(), FarmwatchError>> + Send {
        (**self).publish(topic, message)
    }
}
