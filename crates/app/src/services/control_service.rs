//! Control service — turns a control request into a broker message.

use farmwatch_domain::action::ActionRecord;
use farmwatch_domain::command::Command;
use farmwatch_domain::control::{ControlMessage, ControlResponse};
use farmwatch_domain::device::PowerState;
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::time::now;

use crate::ports::{ActionLog, CommandPublisher, DeviceRepository};

/// Application service behind `GET /device/{id}/control/{command}`.
pub struct ControlService<R, P, L> {
    devices: R,
    publisher: P,
    actions: L,
}

impl<R, P, L> ControlService<R, P, L>
where
    R: DeviceRepository,
    P: CommandPublisher,
    L: ActionLog,
{
    pub fn new(devices: R, publisher: P, actions: L) -> Self {
        Self {
            devices,
            publisher,
            actions,
        }
    }

    /// Send `command` to `device_id`.
    ///
    /// Outcomes the user should see (unknown device, broker refused the
    /// message) come back as an unsuccessful [`ControlResponse`]. Once the
    /// message is out, the device status follows the command and a manual
    /// action is appended to the log.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the device lookup, the status update, or
    /// the action log fails.
    #[tracing::instrument(skip(self))]
    pub async fn control(
        &self,
        device_id: &DeviceId,
        command: Command,
    ) -> Result<ControlResponse, FarmwatchError> {
        let Some(mut device) = self.devices.get_by_id(device_id).await? else {
            tracing::warn!("control request for unknown device");
            return Ok(ControlResponse::device_not_found());
        };

        let message = ControlMessage {
            device_id: device.id.clone(),
            command,
            timestamp: now(),
        };
        if let Err(err) = self.publisher.publish(&device.topic, &message).await {
            tracing::error!(error = %err, topic = %device.topic, "failed to publish command");
            return Ok(ControlResponse::failure(describe(&err)));
        }

        device.status = PowerState::from(command);
        self.devices.update(device).await?;
        self.actions
            .record(ActionRecord::manual(device_id.clone(), command))
            .await?;

        tracing::info!("command sent");
        Ok(ControlResponse::sent(command))
    }

    /// Most recent commands issued to `device_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the action log.
    pub async fn history(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<ActionRecord>, FarmwatchError> {
        self.actions.recent_for_device(device_id, limit).await
    }
}

/// Error text including its sources, as shown to the user.
fn describe(err: &FarmwatchError) -> String {
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
