//! JSON handlers for devices and their command history.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_app::services::reading_service::DEFAULT_HISTORY_LIMIT;
use farmwatch_domain::action::ActionRecord;
use farmwatch_domain::device::Device;
use farmwatch_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// `?limit=` on history endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// `GET /api/devices`
pub async fn list<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
) -> Result<Json<Vec<Device>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(Json(devices))
}

/// `GET /api/devices/{id}`
pub async fn get<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device = state.device_service.get_device(&DeviceId::new(id)).await?;
    Ok(Json(device))
}

/// `GET /api/devices/{id}/actions` — most recent commands, newest first.
pub async fn actions<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ActionRecord>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device = state.device_service.get_device(&DeviceId::new(id)).await?;
    let actions = state
        .control_service
        .history(&device.id, query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .await?;
    Ok(Json(actions))
}
