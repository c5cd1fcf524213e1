//! Device control endpoint called by the dashboard buttons.

use axum::Json;
use axum::extract::{Path, State};

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_domain::command::Command;
use farmwatch_domain::control::ControlResponse;
use farmwatch_domain::id::DeviceId;

use crate::state::AppState;

/// `GET /device/{device_id}/control/{command}`
///
/// Always answers `200` with a [`ControlResponse`]; failures are reported in
/// the body so the page can show them.
pub async fn control<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path((device_id, command)): Path<(String, String)>,
) -> Json<ControlResponse>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let command = match command.parse::<Command>() {
        Ok(command) => command,
        Err(err) => {
            tracing::warn!(%device_id, error = %err, "rejected control request");
            return Json(ControlResponse::failure(err.to_string()));
        }
    };

    let device_id = DeviceId::new(device_id);
    match state.control_service.control(&device_id, command).await {
        Ok(response) => Json(response),
        Err(err) => {
            tracing::error!(%device_id, %command, error = %err, "control request failed");
            Json(ControlResponse::failure(err.to_string()))
        }
    }
}
