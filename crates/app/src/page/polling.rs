//! Periodic device status refresh on the overview pages.

use farmwatch_domain::page::{POLL_INTERVAL, is_polled_route};

use crate::ports::EventLoop;

/// Hook invoked on every poll tick.
pub trait StatusRefresh: 'static {
    fn refresh(&self);
}

/// Refresh hook that only records the tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRefresh;

impl StatusRefresh for LoggingRefresh {
    fn refresh(&self) {
        tracing::info!("updating device statuses");
    }
}

/// Run `hook` every [`POLL_INTERVAL`] when `path` is a polled route.
///
/// Returns whether the interval was registered. Ticks are not skipped while
/// a previous refresh is still running.
pub fn start_polling<L: EventLoop>(path: &str, event_loop: &L, hook: impl StatusRefresh) -> bool {
    if !is_polled_route(path) {
        return false;
    }
    event_loop.set_interval(POLL_INTERVAL, Box::new(move || hook.refresh()));
    true
}
