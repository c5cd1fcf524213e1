//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use farmwatch_domain::error::FarmwatchError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`FarmwatchError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(FarmwatchError);

impl From<FarmwatchError> for ApiError {
    fn from(err: FarmwatchError) -> Self {
        Self(err)
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        Self(FarmwatchError::Storage(Box::new(err)))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            FarmwatchError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            FarmwatchError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            FarmwatchError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            FarmwatchError::Publish(err) => {
                tracing::error!(error = %err, "publish error");
                (StatusCode::BAD_GATEWAY, "message broker unavailable".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
