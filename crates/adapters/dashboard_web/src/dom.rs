//! `web-sys` implementation of the page ports.

use farmwatch_app::ports::{AlertSurface, Element, Page, SubmitDecision};
use farmwatch_domain::alert::{
    ALERT_CONTAINER_CLASS, ALERT_CONTAINER_ID, ALERT_CONTAINER_Z_INDEX, Alert, AlertId,
};
use farmwatch_domain::command::Command;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::page::{Marker, control_button_selector};
use farmwatch_domain::widget::Attributes;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, HtmlFormElement};

use crate::widgets::close_alert;

/// A live DOM element.
#[derive(Clone)]
pub struct DomElement(pub web_sys::Element);

impl Attributes for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

impl Element for DomElement {
    fn id(&self) -> Option<String> {
        Some(self.0.id()).filter(|id| !id.is_empty())
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            tracing::warn!(class, error = ?err, "failed to add class");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            tracing::warn!(class, error = ?err, "failed to remove class");
        }
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn check_validity(&self) -> bool {
        self.0
            .dyn_ref::<HtmlFormElement>()
            .is_none_or(HtmlFormElement::check_validity)
    }
}

/// The document the dashboard script was loaded into.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn query(&self, selector: &str) -> Option<DomElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(DomElement),
            Err(err) => {
                tracing::warn!(selector, error = ?err, "invalid selector");
                None
            }
        }
    }

    fn listen(&self, element: &DomElement, event: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) = element
            .0
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            tracing::error!(event, error = ?err, "failed to attach listener");
            return;
        }
        // Listeners stay attached until the page unloads.
        closure.forget();
    }

    fn create(&self, tag: &str) -> Option<web_sys::Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                tracing::error!(tag, error = ?err, "failed to create element");
                None
            }
        }
    }

    fn build_alert(&self, alert: &Alert) -> Option<web_sys::Element> {
        let block = self.create("div")?;
        block.set_id(&alert.id.to_string());
        block.set_class_name(&alert.class_name());
        block.set_attribute("role", "alert").ok()?;
        block.set_text_content(Some(&alert.message));

        let close = self.create("button")?;
        close.set_attribute("type", "button").ok()?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert").ok()?;
        close.set_attribute("aria-label", "Close").ok()?;
        block.append_child(&close).ok()?;
        Some(block)
    }
}

impl Page for DomPage {
    type Element = DomElement;

    fn path(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_default()
    }

    fn find_all(&self, marker: Marker) -> Vec<DomElement> {
        let nodes = match self.document.query_selector_all(marker.selector()) {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::error!(?marker, error = ?err, "failed to query marked elements");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(DomElement)
            .collect()
    }

    fn control_button(&self, device_id: &DeviceId, command: Command) -> Option<DomElement> {
        self.query(&control_button_selector(device_id, command))
    }

    fn by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement)
    }

    fn on_click(&self, element: &DomElement, handler: Box<dyn Fn()>) {
        self.listen(element, "click", move |event| {
            event.prevent_default();
            handler();
        });
    }

    fn on_submit(&self, form: &DomElement, handler: Box<dyn Fn() -> SubmitDecision>) {
        self.listen(form, "submit", move |event| {
            if handler() == SubmitDecision::Block {
                event.prevent_default();
                event.stop_propagation();
            }
        });
    }
}

impl AlertSurface for DomPage {
    fn ensure_container(&self) -> bool {
        if self.document.get_element_by_id(ALERT_CONTAINER_ID).is_some() {
            return false;
        }
        let (Some(container), Some(body)) = (self.create("div"), self.document.body()) else {
            return false;
        };
        container.set_id(ALERT_CONTAINER_ID);
        container.set_class_name(ALERT_CONTAINER_CLASS);
        let styled = container
            .set_attribute("style", &format!("z-index: {ALERT_CONTAINER_Z_INDEX}"))
            .is_ok();
        if !styled {
            tracing::warn!("failed to raise the alert container");
        }
        match body.append_child(&container) {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(error = ?err, "failed to insert the alert container");
                false
            }
        }
    }

    fn append(&self, alert: &Alert) {
        let Some(container) = self.document.get_element_by_id(ALERT_CONTAINER_ID) else {
            tracing::error!(alert_id = %alert.id, "no alert container");
            return;
        };
        let Some(block) = self.build_alert(alert) else {
            tracing::error!(alert_id = %alert.id, "failed to build alert");
            return;
        };
        if let Err(err) = container.append_child(&block) {
            tracing::error!(alert_id = %alert.id, error = ?err, "failed to show alert");
        }
    }

    fn remove(&self, id: AlertId) -> bool {
        let Some(block) = self.document.get_element_by_id(&id.to_string()) else {
            return false;
        };
        if let Err(err) = close_alert(&block) {
            tracing::debug!(alert_id = %id, error = %err, "detaching alert directly");
            block.remove();
        }
        true
    }
}
