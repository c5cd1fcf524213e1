//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the control endpoint, the JSON API under `/api`, the dashboard
/// pages at `/`, and the files of `static_dir` under `/static`. A
/// [`TraceLayer`] logs each HTTP request/response at the `DEBUG` level.
pub fn build<DR, P, AL, RR>(state: AppState<DR, P, AL, RR>, static_dir: &Path) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/device/{device_id}/control/{command}",
            get(crate::control::control::<DR, P, AL, RR>),
        )
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
