//! Notification renderer — transient alerts stacked in a fixed container.

use std::cell::Cell;
use std::rc::Rc;

use farmwatch_domain::alert::{AUTO_DISMISS, Alert, AlertId, Severity};

use crate::ports::{AlertSurface, EventLoop};

/// Shows alerts on a surface and removes them after [`AUTO_DISMISS`].
pub struct Notifier<S, L> {
    surface: Rc<S>,
    event_loop: Rc<L>,
    last_id: Cell<Option<AlertId>>,
}

impl<S: AlertSurface, L: EventLoop> Notifier<S, L> {
    pub fn new(surface: Rc<S>, event_loop: Rc<L>) -> Self {
        Self {
            surface,
            event_loop,
            last_id: Cell::new(None),
        }
    }

    /// Append an alert below the ones already visible and schedule its removal.
    ///
    /// The removal is a no-op when the alert was dismissed by hand first.
    pub fn show_alert(&self, message: &str, severity: Severity) -> AlertId {
        if self.surface.ensure_container() {
            tracing::debug!("created alert container");
        }

        let id = AlertId::next(self.last_id.get(), self.event_loop.now_millis());
        self.last_id.set(Some(id));
        self.surface.append(&Alert {
            id,
            message: message.to_string(),
            severity,
        });

        let surface = Rc::clone(&self.surface);
        self.event_loop.set_timeout(
            AUTO_DISMISS,
            Box::new(move || {
                if !surface.remove(id) {
                    tracing::debug!(%id, "alert already dismissed");
                }
            }),
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fakes::{FakeLoop, FakePage};

    fn notifier() -> (Rc<FakePage>, Rc<FakeLoop>, Notifier<FakePage, FakeLoop>) {
        let page = Rc::new(FakePage::new("/"));
        let event_loop = Rc::new(FakeLoop::starting_at(1_000));
        let notifier = Notifier::new(Rc::clone(&page), Rc::clone(&event_loop));
        (page, event_loop, notifier)
    }

    #[test]
    fn should_create_container_once() {
        let (page, _loop, notifier) = notifier();

        notifier.show_alert("first", Severity::Info);
        notifier.show_alert("second", Severity::Info);

        assert_eq!(page.containers_created(), 1);
    }

    #[test]
    fn should_stack_alerts_in_insertion_order() {
        let (page, _loop, notifier) = notifier();

        notifier.show_alert("first", Severity::Success);
        notifier.show_alert("first", Severity::Success);
        notifier.show_alert("third", Severity::Danger);

        let messages: Vec<String> = page.alerts().into_iter().map(|a| a.message).collect();
        assert_eq!(messages, vec!["first", "first", "third"]);
    }

    #[test]
    fn should_hand_out_distinct_ids_within_one_millisecond() {
        let (_page, _loop, notifier) = notifier();

        let a = notifier.show_alert("a", Severity::Info);
        let b = notifier.show_alert("b", Severity::Info);

        assert_eq!(a.to_string(), "alert-1000");
        assert!(b > a);
    }

    #[test]
    fn should_remove_alert_after_auto_dismiss_delay() {
        let (page, event_loop, notifier) = notifier();

        notifier.show_alert("bye", Severity::Warning);
        event_loop.advance(4_999);
        assert_eq!(page.alerts().len(), 1);

        event_loop.advance(1);
        assert!(page.alerts().is_empty());
    }

    #[test]
    fn should_tolerate_manual_dismissal_before_timer_fires() {
        let (page, event_loop, notifier) = notifier();

        let id = notifier.show_alert("bye", Severity::Warning);
        assert!(page.remove(id));

        event_loop.advance(5_000);
        assert!(page.alerts().is_empty());
    }
}
