//! Bindings to the widget libraries loaded by the page template: Bootstrap
//! (tooltips, popovers, alerts), Leaflet (farm maps), and Chart.js (sensor
//! charts).

use farmwatch_app::ports::{WidgetError, WidgetHost, WidgetLibrary};
use farmwatch_domain::widget::{
    ChartDescriptor, MAP_ZOOM, MapDescriptor, TILE_ATTRIBUTION, TILE_URL,
};
use wasm_bindgen::prelude::*;

use crate::dom::DomElement;

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    type Tooltip;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &web_sys::Element) -> Result<Tooltip, JsValue>;
}

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    type Popover;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &web_sys::Element) -> Result<Popover, JsValue>;
}

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    type Alert;

    #[wasm_bindgen(static_method_of = Alert, js_name = getOrCreateInstance, catch)]
    fn get_or_create_instance(element: &web_sys::Element) -> Result<Alert, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn close(this: &Alert) -> Result<(), JsValue>;
}

#[wasm_bindgen(js_namespace = L)]
extern "C" {
    type LeafletMap;
    type Layer;

    #[wasm_bindgen(js_name = map, catch)]
    fn leaflet_map(element_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: u8) -> LeafletMap;

    #[wasm_bindgen(js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_name = marker)]
    fn marker(position: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &web_sys::Element) -> Layer;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Layer) -> Layer;
}

#[wasm_bindgen]
extern "C" {
    type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &web_sys::Element, config: &JsValue) -> Result<Chart, JsValue>;
}

fn library_error(value: &JsValue) -> WidgetError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    WidgetError::Library(message)
}

fn global(name: &str) -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .is_ok_and(|value| !value.is_undefined() && !value.is_null())
}

/// Close an alert through Bootstrap so it fades out and fires the
/// `close.bs.alert` and `closed.bs.alert` events.
///
/// # Errors
///
/// Returns [`WidgetError::Library`] when Bootstrap is not loaded or rejects
/// the element.
pub(crate) fn close_alert(element: &web_sys::Element) -> Result<(), WidgetError> {
    if !global("bootstrap") {
        return Err(WidgetError::Library("bootstrap is not loaded".to_string()));
    }
    get_or_create_instance(element)
        .and_then(|alert| alert.close())
        .map_err(|err| library_error(&err))
}

/// Widget host backed by the libraries' browser globals.
pub struct JsWidgets;

impl JsWidgets {
    fn popup_content(farm_name: &str) -> Result<web_sys::Element, WidgetError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| WidgetError::Library("no document".to_string()))?;
        let content = document
            .create_element("b")
            .map_err(|err| library_error(&err))?;
        content.set_text_content(Some(farm_name));
        Ok(content)
    }
}

impl WidgetHost<DomElement> for JsWidgets {
    fn is_loaded(&self, library: WidgetLibrary) -> bool {
        match library {
            WidgetLibrary::Bootstrap => global("bootstrap"),
            WidgetLibrary::Leaflet => global("L"),
            WidgetLibrary::ChartJs => global("Chart"),
        }
    }

    fn tooltip(&self, element: &DomElement) -> Result<(), WidgetError> {
        Tooltip::new(&element.0).map_err(|err| library_error(&err))?;
        Ok(())
    }

    fn popover(&self, element: &DomElement) -> Result<(), WidgetError> {
        Popover::new(&element.0).map_err(|err| library_error(&err))?;
        Ok(())
    }

    fn map(&self, map: &MapDescriptor) -> Result<(), WidgetError> {
        let position = js_sys::Array::of2(&map.latitude.into(), &map.longitude.into());
        let leaflet = leaflet_map(&map.element_id)
            .map_err(|err| library_error(&err))?
            .set_view(&position, MAP_ZOOM);

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"attribution".into(), &TILE_ATTRIBUTION.into())
            .map_err(|err| library_error(&err))?;
        tile_layer(TILE_URL, &options).add_to(&leaflet);

        marker(&position)
            .add_to(&leaflet)
            .bind_popup(&Self::popup_content(&map.farm_name)?)
            .open_popup();
        Ok(())
    }

    fn chart(&self, element: &DomElement, chart: &ChartDescriptor) -> Result<(), WidgetError> {
        let config = serde_json::to_string(&chart.to_config())
            .map_err(|err| WidgetError::Library(err.to_string()))?;
        let config = js_sys::JSON::parse(&config).map_err(|err| library_error(&err))?;
        Chart::new(&element.0, &config).map_err(|err| library_error(&err))?;
        Ok(())
    }
}
