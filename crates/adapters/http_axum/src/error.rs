//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gather_domain::error::GatherError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Maps [`GatherError`] to an HTTP response with appropriate status code.
pub struct ApiError(GatherError);

impl From<GatherError> for ApiError {
    fn from(err: GatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GatherError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            GatherError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            GatherError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            GatherError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
