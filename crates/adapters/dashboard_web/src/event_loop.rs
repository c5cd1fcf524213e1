//! The browser event loop: `setTimeout`, `setInterval`, and local tasks.

use std::time::Duration;

use farmwatch_app::ports::{EventLoop, LocalTask};
use gloo_timers::callback::{Interval, Timeout};

pub struct BrowserLoop;

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl EventLoop for BrowserLoop {
    #[allow(clippy::cast_possible_truncation)]
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        Timeout::new(millis(delay), task).forget();
    }

    // Intervals run for the lifetime of the page.
    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) {
        Interval::new(millis(period), task).forget();
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
