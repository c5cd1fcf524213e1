//! Overview page: farm maps and device cards.

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};

use crate::dashboard::{DeviceView, FarmView, render};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    farms: Vec<FarmView>,
    devices: Vec<DeviceView>,
    active_devices: usize,
}

/// `GET /`
pub async fn index<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
) -> Result<Html<String>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let devices: Vec<DeviceView> = state
        .device_service
        .list_devices()
        .await?
        .iter()
        .map(DeviceView::from)
        .collect();

    render(&HomeTemplate {
        farms: state
            .farms
            .iter()
            .enumerate()
            .map(|(index, farm)| FarmView::new(index, farm))
            .collect(),
        active_devices: devices.iter().filter(|d| d.on_active).count(),
        devices,
    })
}
