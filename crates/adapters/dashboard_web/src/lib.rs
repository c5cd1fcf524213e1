//! # farmwatch-dashboard-web
//!
//! Browser adapter for the server-rendered dashboard. Compiled to
//! WebAssembly and loaded by every page from `/static/pkg/`.
//!
//! ## Responsibilities
//! - Implement the browser ports (`Page`, `AlertSurface`, `EventLoop`,
//!   `ControlTransport`, `WidgetHost`) over `web-sys`, `gloo`, and the
//!   Bootstrap, Leaflet, and Chart.js globals
//! - Run the page bootstrapper once the document is parsed
//!
//! Behaviour lives in `farmwatch_app::page`; this crate only touches the DOM.

mod dom;
mod event_loop;
mod transport;
mod widgets;

use std::rc::Rc;

use farmwatch_app::page::bootstrap::Bootstrapper;
use farmwatch_app::page::polling::LoggingRefresh;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, DocumentReadyState};

use crate::dom::DomPage;
use crate::event_loop::BrowserLoop;
use crate::transport::FetchTransport;
use crate::widgets::JsWidgets;

/// WASM entry point, called when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        tracing::error!("no document to attach the dashboard to");
        return;
    };

    if document.ready_state() == DocumentReadyState::Loading {
        let target = document.clone();
        let on_ready = Closure::once_into_js(move || boot(target));
        if let Err(err) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            tracing::error!(error = ?err, "failed to wait for DOMContentLoaded");
        }
    } else {
        boot(document);
    }
}

fn boot(document: Document) {
    let report = Bootstrapper::new(
        Rc::new(DomPage::new(document)),
        Rc::new(BrowserLoop),
        Rc::new(FetchTransport),
        JsWidgets,
    )
    .run(LoggingRefresh);
    tracing::info!(?report, "dashboard ready");
}
