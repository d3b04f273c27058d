use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Uniform error taxonomy for the whole API. Every failure renders as a
/// short `{ "message": ... }` body; read misses are not errors (handlers
/// return empty results for those).
#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential presented at all.
    #[error("unauthorized access")]
    Unauthenticated,

    /// Credential present but invalid, expired, or the wrong role/owner.
    #[error("forbidden access")]
    Forbidden,

    /// Malformed identifier or missing required field.
    #[error("{0}")]
    InvalidArgument(String),

    /// Store or payment provider failure. Not retried; the detail is
    /// logged, never sent to the client.
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                error!("dependency failure: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = self.to_string();
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Path identifiers arrive as raw strings so a malformed one maps to
/// InvalidArgument with the standard error body instead of the framework's
/// plain-text rejection.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidArgument(format!("invalid id: {raw}")))
}
