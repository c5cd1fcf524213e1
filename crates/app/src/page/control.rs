//! Device control flow — a control button click, the request it issues, and
//! the page update that follows.

use std::rc::Rc;

use farmwatch_domain::alert::{GENERIC_CONTROL_FAILURE, Severity};
use farmwatch_domain::command::Command;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::page::{ACTIVE_CLASS, status_badge_id};

use crate::page::notification::Notifier;
use crate::ports::{AlertSurface, ControlTransport, Element, EventLoop, Page};

/// How a control request ended, from the page's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    /// The server accepted the command and the page reflects it.
    Applied,
    /// The server answered with `success: false`.
    Rejected,
    /// No usable answer came back.
    Failed,
}

pub struct DeviceControl<T, P, L> {
    transport: Rc<T>,
    page: Rc<P>,
    notifier: Notifier<P, L>,
}

impl<T, P, L> DeviceControl<T, P, L>
where
    T: ControlTransport,
    P: Page + AlertSurface,
    L: EventLoop,
{
    pub fn new(transport: Rc<T>, page: Rc<P>, event_loop: Rc<L>) -> Self {
        let notifier = Notifier::new(Rc::clone(&page), event_loop);
        Self {
            transport,
            page,
            notifier,
        }
    }

    /// Send `command` to `device_id` and render the result.
    ///
    /// Exactly one alert is shown per call. Buttons and the status badge only
    /// change when the server reports success. Requests are neither retried
    /// nor ordered against each other; the last response to arrive wins.
    pub async fn control_device(&self, device_id: &DeviceId, command: Command) -> ControlOutcome {
        match self.transport.control(device_id, command).await {
            Ok(response) if response.success => {
                self.notifier.show_alert(&response.message, Severity::Success);
                self.reflect(device_id, command);
                ControlOutcome::Applied
            }
            Ok(response) => {
                self.notifier.show_alert(&response.message, Severity::Danger);
                ControlOutcome::Rejected
            }
            Err(err) => {
                tracing::error!(error = %err, %device_id, %command, "device control request failed");
                self.notifier
                    .show_alert(GENERIC_CONTROL_FAILURE, Severity::Danger);
                ControlOutcome::Failed
            }
        }
    }

    fn reflect(&self, device_id: &DeviceId, command: Command) {
        match self.page.control_button(device_id, command) {
            Some(button) => button.add_class(ACTIVE_CLASS),
            None => tracing::warn!(%device_id, %command, "control button not found"),
        }
        match self.page.control_button(device_id, command.opposite()) {
            Some(button) => button.remove_class(ACTIVE_CLASS),
            None => {
                tracing::warn!(%device_id, command = %command.opposite(), "control button not found");
            }
        }

        if let Some(badge) = self.page.by_id(&status_badge_id(device_id)) {
            badge.set_text(command.status_label());
            badge.set_class_name(command.status_class());
        }
    }
}
