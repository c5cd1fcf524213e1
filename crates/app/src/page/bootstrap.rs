//! Page bootstrapper — discovers marked elements once per page load and
//! attaches widgets and handlers to them.

use std::rc::Rc;

use farmwatch_domain::command::Command;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::page::{ATTR_COMMAND, ATTR_DEVICE_ID, Marker};
use farmwatch_domain::widget::{Attributes, ChartDescriptor, MapDescriptor};

use crate::page::control::DeviceControl;
use crate::page::polling::{StatusRefresh, start_polling};
use crate::page::validation::FormValidator;
use crate::ports::{
    AlertSurface, ControlTransport, Element, EventLoop, Page, WidgetError, WidgetHost, WidgetLibrary,
};

/// What the bootstrapper attached.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub tooltips: usize,
    pub popovers: usize,
    pub maps: usize,
    pub charts: usize,
    pub controls: usize,
    pub forms: usize,
    /// Widgets whose configuration or construction failed.
    pub failed_widgets: usize,
    /// Whether the status refresh interval was started.
    pub polling: bool,
}

pub struct Bootstrapper<P, L, T, W> {
    page: Rc<P>,
    event_loop: Rc<L>,
    transport: Rc<T>,
    widgets: W,
}

impl<P, L, T, W> Bootstrapper<P, L, T, W>
where
    P: Page + AlertSurface,
    L: EventLoop,
    T: ControlTransport,
    W: WidgetHost<P::Element>,
{
    pub fn new(page: Rc<P>, event_loop: Rc<L>, transport: Rc<T>, widgets: W) -> Self {
        Self {
            page,
            event_loop,
            transport,
            widgets,
        }
    }

    /// Attach every behaviour to the page.
    ///
    /// A category with no matching element is a no-op. A widget that fails
    /// to build is logged and counted; the rest of the page is still wired.
    #[tracing::instrument(skip_all, fields(path = %self.page.path()))]
    pub fn run(&self, refresh: impl StatusRefresh) -> BootReport {
        let mut report = BootReport::default();

        for element in self.page.find_all(Marker::Tooltip) {
            tally(self.widgets.tooltip(&element), &mut report.tooltips, &mut report.failed_widgets);
        }
        for element in self.page.find_all(Marker::Popover) {
            tally(self.widgets.popover(&element), &mut report.popovers, &mut report.failed_widgets);
        }
        self.init_maps(&mut report);
        self.init_charts(&mut report);
        report.controls = self.bind_controls();
        report.forms = self.bind_forms();
        report.polling = start_polling(&self.page.path(), self.event_loop.as_ref(), refresh);

        tracing::debug!(?report, "page bootstrapped");
        report
    }

    fn init_maps(&self, report: &mut BootReport) {
        if !self.widgets.is_loaded(WidgetLibrary::Leaflet) {
            tracing::debug!("map library not loaded, skipping farm maps");
            return;
        }
        for element in self.page.find_all(Marker::FarmMap) {
            let result = MapDescriptor::from_attributes(element.id(), &element)
                .map_err(WidgetError::from)
                .and_then(|map| self.widgets.map(&map));
            tally(result, &mut report.maps, &mut report.failed_widgets);
        }
    }

    fn init_charts(&self, report: &mut BootReport) {
        if !self.widgets.is_loaded(WidgetLibrary::ChartJs) {
            tracing::debug!("chart library not loaded, skipping sensor charts");
            return;
        }
        for element in self.page.find_all(Marker::SensorChart) {
            let result = ChartDescriptor::from_attributes(&element)
                .map_err(WidgetError::from)
                .and_then(|chart| self.widgets.chart(&element, &chart));
            tally(result, &mut report.charts, &mut report.failed_widgets);
        }
    }

    fn bind_controls(&self) -> usize {
        let control = Rc::new(DeviceControl::new(
            Rc::clone(&self.transport),
            Rc::clone(&self.page),
            Rc::clone(&self.event_loop),
        ));

        let mut bound = 0;
        for button in self.page.find_all(Marker::DeviceControl) {
            let Some((device_id, command)) = control_target(&button) else {
                continue;
            };
            let control = Rc::clone(&control);
            let event_loop = Rc::clone(&self.event_loop);
            self.page.on_click(
                &button,
                Box::new(move || {
                    let control = Rc::clone(&control);
                    let device_id = device_id.clone();
                    event_loop.spawn(Box::pin(async move {
                        control.control_device(&device_id, command).await;
                    }));
                }),
            );
            bound += 1;
        }
        bound
    }

    fn bind_forms(&self) -> usize {
        let forms = self.page.find_all(Marker::NeedsValidation);
        for form in &forms {
            let target = form.clone();
            self.page
                .on_submit(form, Box::new(move || FormValidator::on_submit(&target)));
        }
        forms.len()
    }
}

fn tally(result: Result<(), WidgetError>, created: &mut usize, failed: &mut usize) {
    match result {
        Ok(()) => *created += 1,
        Err(err) => {
            let cause = std::error::Error::source(&err).map(ToString::to_string);
            tracing::error!(error = %err, ?cause, "widget initialization failed");
            *failed += 1;
        }
    }
}

/// Device and command a control button is wired to.
fn control_target(button: &impl Attributes) -> Option<(DeviceId, Command)> {
    let device_id = match button.attribute(ATTR_DEVICE_ID) {
        Some(id) if !id.is_empty() => DeviceId::new(id),
        _ => {
            tracing::warn!("control button without a device id");
            return None;
        }
    };
    let raw = button.attribute(ATTR_COMMAND).unwrap_or_default();
    match raw.parse::<Command>() {
        Ok(command) => Some((device_id, command)),
        Err(err) => {
            tracing::warn!(%device_id, error = %err, "control button with unusable command");
            None
        }
    }
}
