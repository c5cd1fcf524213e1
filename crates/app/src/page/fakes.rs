//! In-memory browser ports for the page use-case tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::future::{Future, ready};
use std::rc::Rc;
use std::task::{Context, Waker};
use std::time::Duration;

use farmwatch_domain::alert::{Alert, AlertId};
use farmwatch_domain::command::Command;
use farmwatch_domain::control::ControlResponse;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::page::{ATTR_COMMAND, ATTR_DEVICE_ID, Marker};
use farmwatch_domain::widget::{Attributes, ChartDescriptor, MapDescriptor};

use crate::ports::{
    AlertSurface, ControlTransport, Element, EventLoop, LocalTask, Page, SubmitDecision,
    TransportError, WidgetError, WidgetHost, WidgetLibrary,
};

#[derive(Default)]
struct ElementState {
    id: Option<String>,
    markers: Vec<Marker>,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    invalid: bool,
}

/// Shared handle to a fake node; clones point at the same node.
#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marked(marker: Marker) -> Self {
        let element = Self::new();
        element.0.borrow_mut().markers.push(marker);
        element
    }

    pub fn control_button(device_id: &str, command: &str) -> Self {
        Self::marked(Marker::DeviceControl)
            .with_class("device-control")
            .with_attr(ATTR_DEVICE_ID, device_id)
            .with_attr(ATTR_COMMAND, command)
    }

    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_string());
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn invalid(self) -> Self {
        self.set_valid(false);
        self
    }

    pub fn set_valid(&self, valid: bool) {
        self.0.borrow_mut().invalid = !valid;
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn class_name(&self) -> String {
        self.0.borrow().classes.join(" ")
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn is(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn has_marker(&self, marker: Marker) -> bool {
        self.0.borrow().markers.contains(&marker)
    }
}

impl Attributes for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }
}

impl Element for FakeElement {
    fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.borrow_mut().classes = class_name.split_whitespace().map(String::from).collect();
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn check_validity(&self) -> bool {
        !self.0.borrow().invalid
    }
}

type ClickHandler = Rc<dyn Fn()>;
type SubmitHandler = Rc<dyn Fn() -> SubmitDecision>;

/// A document holding fake elements and an alert container.
pub struct FakePage {
    path: String,
    elements: RefCell<Vec<FakeElement>>,
    clicks: RefCell<Vec<(FakeElement, ClickHandler)>>,
    submits: RefCell<Vec<(FakeElement, SubmitHandler)>>,
    has_container: Cell<bool>,
    containers_created: Cell<usize>,
    alerts: RefCell<Vec<Alert>>,
}

impl FakePage {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            elements: RefCell::default(),
            clicks: RefCell::default(),
            submits: RefCell::default(),
            has_container: Cell::new(false),
            containers_created: Cell::new(0),
            alerts: RefCell::default(),
        }
    }

    /// Insert `element` at the end of the document and return a handle to it.
    pub fn add(&self, element: FakeElement) -> FakeElement {
        self.elements.borrow_mut().push(element.clone());
        element
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }

    pub fn containers_created(&self) -> usize {
        self.containers_created.get()
    }

    /// Dispatch a click to every handler registered on `element`.
    pub fn click(&self, element: &FakeElement) {
        let handlers: Vec<ClickHandler> = self
            .clicks
            .borrow()
            .iter()
            .filter(|(target, _)| target.is(element))
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Dispatch a submit event; `None` when no handler is registered.
    pub fn submit(&self, form: &FakeElement) -> Option<SubmitDecision> {
        let handler = self
            .submits
            .borrow()
            .iter()
            .find(|(target, _)| target.is(form))
            .map(|(_, handler)| Rc::clone(handler))?;
        Some(handler())
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn path(&self) -> String {
        self.path.clone()
    }

    fn find_all(&self, marker: Marker) -> Vec<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.has_marker(marker))
            .cloned()
            .collect()
    }

    fn control_button(&self, device_id: &DeviceId, command: Command) -> Option<FakeElement> {
        self.find_all(Marker::DeviceControl).into_iter().find(|e| {
            e.attribute(ATTR_DEVICE_ID).as_deref() == Some(device_id.as_str())
                && e.attribute(ATTR_COMMAND).as_deref() == Some(command.as_str())
        })
    }

    fn by_id(&self, id: &str) -> Option<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.id().as_deref() == Some(id))
            .cloned()
    }

    fn on_click(&self, element: &FakeElement, handler: Box<dyn Fn()>) {
        self.clicks
            .borrow_mut()
            .push((element.clone(), Rc::from(handler)));
    }

    fn on_submit(&self, form: &FakeElement, handler: Box<dyn Fn() -> SubmitDecision>) {
        self.submits
            .borrow_mut()
            .push((form.clone(), Rc::from(handler)));
    }
}

impl AlertSurface for FakePage {
    fn ensure_container(&self) -> bool {
        if self.has_container.get() {
            return false;
        }
        self.has_container.set(true);
        self.containers_created.set(self.containers_created.get() + 1);
        true
    }

    fn append(&self, alert: &Alert) {
        self.alerts.borrow_mut().push(alert.clone());
    }

    fn remove(&self, id: AlertId) -> bool {
        let mut alerts = self.alerts.borrow_mut();
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        alerts.len() != before
    }
}

enum TimerTask {
    Once(Box<dyn FnOnce()>),
    Every(i64, Box<dyn FnMut()>),
}

struct Timer {
    due: i64,
    task: TimerTask,
}

/// Manually driven clock, timers, and task queue.
pub struct FakeLoop {
    now: Cell<i64>,
    timers: RefCell<Vec<Timer>>,
    tasks: RefCell<Vec<LocalTask>>,
}

impl FakeLoop {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            now: Cell::new(millis),
            timers: RefCell::default(),
            tasks: RefCell::default(),
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Move the clock forward, firing due timers in order.
    pub fn advance(&self, millis: i64) {
        let target = self.now.get() + millis;
        loop {
            let next = self
                .timers
                .borrow()
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= target)
                .min_by_key(|(_, t)| t.due)
                .map(|(index, _)| index);
            let Some(index) = next else { break };

            let Timer { due, task } = self.timers.borrow_mut().remove(index);
            self.now.set(due);
            match task {
                TimerTask::Once(task) => task(),
                TimerTask::Every(period, mut task) => {
                    task();
                    self.timers.borrow_mut().push(Timer {
                        due: due + period,
                        task: TimerTask::Every(period, task),
                    });
                }
            }
        }
        self.now.set(target);
    }

    /// Poll spawned tasks until none makes progress.
    pub fn run_tasks(&self) {
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            let tasks: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
            if tasks.is_empty() {
                break;
            }
            let mut pending = Vec::new();
            for mut task in tasks {
                if task.as_mut().poll(&mut cx).is_pending() {
                    pending.push(task);
                }
            }
            let stalled = !pending.is_empty() && self.tasks.borrow().is_empty();
            self.tasks.borrow_mut().extend(pending);
            if stalled {
                break;
            }
        }
    }
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap()
}

impl EventLoop for FakeLoop {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + millis(delay),
            task: TimerTask::Once(task),
        });
    }

    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) {
        let period = millis(period);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + period,
            task: TimerTask::Every(period, task),
        });
    }

    fn spawn(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}

/// Answers every control request with the same reply.
pub struct FakeTransport {
    reply: Result<ControlResponse, TransportError>,
    calls: RefCell<Vec<(DeviceId, Command)>>,
}

impl FakeTransport {
    pub fn replying(reply: Result<ControlResponse, TransportError>) -> Self {
        Self {
            reply,
            calls: RefCell::default(),
        }
    }

    pub fn calls(&self) -> Vec<(DeviceId, Command)> {
        self.calls.borrow().clone()
    }
}

impl ControlTransport for FakeTransport {
    fn control(
        &self,
        device_id: &DeviceId,
        command: Command,
    ) -> impl Future<Output = Result<ControlResponse, TransportError>> {
        self.calls.borrow_mut().push((device_id.clone(), command));
        ready(self.reply.clone())
    }
}

/// Records the widgets it was asked to build.
pub struct FakeWidgets {
    loaded: Vec<WidgetLibrary>,
    pub created: Rc<RefCell<Vec<String>>>,
}

impl FakeWidgets {
    pub fn loaded(libraries: &[WidgetLibrary]) -> Self {
        Self {
            loaded: libraries.to_vec(),
            created: Rc::default(),
        }
    }

    pub fn all_loaded() -> Self {
        Self::loaded(&[
            WidgetLibrary::Bootstrap,
            WidgetLibrary::Leaflet,
            WidgetLibrary::ChartJs,
        ])
    }

    fn record(&self, entry: String) -> Result<(), WidgetError> {
        self.created.borrow_mut().push(entry);
        Ok(())
    }
}

impl WidgetHost<FakeElement> for FakeWidgets {
    fn is_loaded(&self, library: WidgetLibrary) -> bool {
        self.loaded.contains(&library)
    }

    fn tooltip(&self, _element: &FakeElement) -> Result<(), WidgetError> {
        self.record("tooltip".to_string())
    }

    fn popover(&self, _element: &FakeElement) -> Result<(), WidgetError> {
        self.record("popover".to_string())
    }

    fn map(&self, map: &MapDescriptor) -> Result<(), WidgetError> {
        self.record(format!("map:{}:{}", map.element_id, map.farm_name))
    }

    fn chart(&self, _element: &FakeElement, chart: &ChartDescriptor) -> Result<(), WidgetError> {
        self.record(format!("chart:{}:{}", chart.kind, chart.labels.len()))
    }
}
