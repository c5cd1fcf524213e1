//! Server-side rendered dashboard pages.
//!
//! The markup is the contract with the dashboard script: control buttons,
//! status badges, farm maps, sensor charts, and validated forms are found by
//! the classes, ids, and `data-*` attributes rendered here.

#[allow(clippy::missing_errors_doc)]
pub mod device_detail;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod history;
#[allow(clippy::missing_errors_doc)]
pub mod home;

use askama::Template;
use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_domain::device::{Device, PowerState};
use farmwatch_domain::farm::Farm;
use farmwatch_domain::page::status_badge_id;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<DR, P, AL, RR>() -> Router<AppState<DR, P, AL, RR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<DR, P, AL, RR>))
        .route("/device", get(devices::list::<DR, P, AL, RR>))
        .route(
            "/device/add",
            get(devices::new_form::<DR, P, AL, RR>).post(devices::create::<DR, P, AL, RR>),
        )
        .route("/device/{id}", get(device_detail::show::<DR, P, AL, RR>))
        .route(
            "/device/{id}/edit",
            get(devices::edit_form::<DR, P, AL, RR>).post(devices::update::<DR, P, AL, RR>),
        )
        .route("/device/{id}/delete", post(devices::delete::<DR, P, AL, RR>))
        .route("/history", get(history::latest::<DR, P, AL, RR>))
        .route("/history/daily", get(history::daily::<DR, P, AL, RR>))
}

fn render(template: &impl Template) -> Result<Html<String>, ApiError> {
    Ok(Html(template.render()?))
}

/// A device as rendered in cards, rows, and the detail header.
pub struct DeviceView {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    pub farm: String,
    pub description: String,
    pub controllable: bool,
    pub on_active: bool,
    pub off_active: bool,
    pub badge_id: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&Device> for DeviceView {
    fn from(device: &Device) -> Self {
        let command = device.status.command();
        Self {
            id: device.id.to_string(),
            name: device.name.clone(),
            kind: device.kind.as_str(),
            farm: device.farm.clone().unwrap_or_default(),
            description: device.description.clone().unwrap_or_default(),
            controllable: device.is_controllable(),
            on_active: device.status == PowerState::On,
            off_active: device.status == PowerState::Off,
            badge_id: status_badge_id(&device.id),
            status_label: command.status_label(),
            status_class: command.status_class(),
        }
    }
}

/// A farm as rendered with its map.
pub struct FarmView {
    pub map_id: String,
    pub name: String,
    pub location: String,
    pub crop_type: String,
    pub latitude: String,
    pub longitude: String,
}

impl FarmView {
    fn new(index: usize, farm: &Farm) -> Self {
        Self {
            map_id: Farm::map_element_id(index),
            name: farm.name.clone(),
            location: farm.location.clone().unwrap_or_default(),
            crop_type: farm.crop_type.clone().unwrap_or_default(),
            latitude: farm.latitude.to_string(),
            longitude: farm.longitude.to_string(),
        }
    }
}

fn format_value(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.1}{unit}"))
}
