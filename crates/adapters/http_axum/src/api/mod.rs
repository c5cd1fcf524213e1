//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod readings;

use axum::Router;
use axum::routing::{get, post};

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, P, AL, RR>() -> Router<AppState<DR, P, AL, RR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/devices", get(devices::list::<DR, P, AL, RR>))
        .route("/devices/{id}", get(devices::get::<DR, P, AL, RR>))
        .route(
            "/devices/{id}/actions",
            get(devices::actions::<DR, P, AL, RR>),
        )
        .route(
            "/devices/{id}/readings",
            get(readings::history::<DR, P, AL, RR>),
        )
        .route("/sensor_data", post(readings::ingest::<DR, P, AL, RR>))
}
