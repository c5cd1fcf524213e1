//! Browser ports — the page the dashboard script is attached to.
//!
//! Everything here runs on the browser's event loop: callbacks never overlap,
//! so implementations are free to use `Rc`/`RefCell` and none of these traits
//! require `Send`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use farmwatch_domain::alert::{Alert, AlertId};
use farmwatch_domain::command::Command;
use farmwatch_domain::control::ControlResponse;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::page::Marker;
use farmwatch_domain::widget::{Attributes, ChartDescriptor, MapDescriptor, WidgetConfigError};

/// A future scheduled on the event loop.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// A node in the page.
pub trait Element: Attributes + Clone + 'static {
    /// The element's `id` attribute, if set.
    fn id(&self) -> Option<String>;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Replace the whole class attribute.
    fn set_class_name(&self, class_name: &str);

    fn set_text(&self, text: &str);

    /// Native constraint validation. Elements that are not forms are valid.
    fn check_validity(&self) -> bool;
}

/// What the browser should do with a submit event after the handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Let the form submit.
    Proceed,
    /// Prevent the default action and stop propagation.
    Block,
}

/// The loaded document.
pub trait Page: 'static {
    type Element: Element;

    /// Path of the current location, e.g. `/device`.
    fn path(&self) -> String;

    /// Every element matching `marker`, in document order.
    fn find_all(&self, marker: Marker) -> Vec<Self::Element>;

    /// The control button issuing `command` for `device_id`.
    fn control_button(&self, device_id: &DeviceId, command: Command) -> Option<Self::Element>;

    fn by_id(&self, id: &str) -> Option<Self::Element>;

    /// Subscribe `handler` to clicks on `element`. The default action is
    /// always prevented.
    fn on_click(&self, element: &Self::Element, handler: Box<dyn Fn()>);

    /// Subscribe `handler` to submit events of `form`.
    fn on_submit(&self, form: &Self::Element, handler: Box<dyn Fn() -> SubmitDecision>);
}

/// Where alerts are rendered.
pub trait AlertSurface: 'static {
    /// Create the alert container if the page has none.
    ///
    /// Returns `true` when it had to be created.
    fn ensure_container(&self) -> bool;

    /// Append `alert` after any alert already shown.
    fn append(&self, alert: &Alert);

    /// Remove the alert `id`. Returns `false` when it was already gone.
    fn remove(&self, id: AlertId) -> bool;
}

/// Timers, task spawning, and the wall clock of the event loop.
pub trait EventLoop: 'static {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>);

    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>);

    fn spawn(&self, task: LocalTask);
}

/// Why a control request produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("response body is not a control response: {0}")]
    Decode(String),
}

/// Issues control requests to the server.
pub trait ControlTransport: 'static {
    fn control(
        &self,
        device_id: &DeviceId,
        command: Command,
    ) -> impl Future<Output = Result<ControlResponse, TransportError>>;
}

/// External widget libraries the page may load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetLibrary {
    Bootstrap,
    Leaflet,
    ChartJs,
}

/// Why a widget could not be created.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("invalid widget configuration")]
    Config(#[from] WidgetConfigError),

    #[error("widget library rejected the element: {0}")]
    Library(String),
}

/// Constructs external-library widgets bound to page elements.
pub trait WidgetHost<E> {
    fn is_loaded(&self, library: WidgetLibrary) -> bool;

    fn tooltip(&self, element: &E) -> Result<(), WidgetError>;

    fn popover(&self, element: &E) -> Result<(), WidgetError>;

    fn map(&self, map: &MapDescriptor) -> Result<(), WidgetError>;

    fn chart(&self, element: &E, chart: &ChartDescriptor) -> Result<(), WidgetError>;
}
