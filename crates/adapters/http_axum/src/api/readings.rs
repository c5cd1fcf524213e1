//! JSON handlers for sensor readings.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_app::services::reading_service::Measurement;
use farmwatch_domain::error::FarmwatchError;
use farmwatch_domain::id::DeviceId;
use farmwatch_domain::reading::SensorReading;

use crate::api::devices::HistoryQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /api/sensor_data`.
#[derive(Debug, Deserialize)]
pub struct SensorDataRequest {
    pub device_id: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub moisture: Option<f64>,
}

#[derive(Debug, Serialize)]
struct IngestBody {
    success: bool,
    message: String,
}

/// Possible responses from the ingestion endpoint.
pub enum IngestResponse {
    Received,
    UnknownDevice,
    Failed(String),
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        let (status, success, message) = match self {
            Self::Received => (StatusCode::OK, true, "Data received successfully".to_string()),
            Self::UnknownDevice => (StatusCode::NOT_FOUND, false, "Device not found".to_string()),
            Self::Failed(message) => (StatusCode::INTERNAL_SERVER_ERROR, false, message),
        };
        (status, Json(IngestBody { success, message })).into_response()
    }
}

/// `POST /api/sensor_data`
pub async fn ingest<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Json(req): Json<SensorDataRequest>,
) -> IngestResponse
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::new(req.device_id);
    let measurement = Measurement {
        temperature: req.temperature,
        humidity: req.humidity,
        moisture: req.moisture,
    };
    match state.reading_service.ingest(&device_id, measurement).await {
        Ok(_) => IngestResponse::Received,
        Err(FarmwatchError::NotFound(_)) => IngestResponse::UnknownDevice,
        Err(err) => {
            tracing::error!(%device_id, error = %err, "failed to store sensor data");
            IngestResponse::Failed(err.to_string())
        }
    }
}

/// `GET /api/devices/{id}/readings` — most recent readings, newest first.
pub async fn history<DR, P, AL, RR>(
    State(state): State<AppState<DR, P, AL, RR>>,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SensorReading>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    let device = state.device_service.get_device(&DeviceId::new(id)).await?;
    let readings = state
        .reading_service
        .history(&device.id, query.limit)
        .await?;
    Ok(Json(readings))
}
