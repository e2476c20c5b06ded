//! Error types for mlib-catalog
//!
//! Every failure reaching a handler is mapped to one of four outcomes:
//! bad client input (400), not found (404), upstream enrichment failure
//! (500) or persistence failure (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::edit::EditError;
use crate::enrichment::EnrichmentError;
use crate::lyrics::LyricsError;
use crate::pagination::QueryError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Metadata enrichment failed (500)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Store error
    #[error("Store error: {0}")]
    Common(#[from] mlib_common::Error),
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidPage(_) => ApiError::BadRequest("Invalid page parameter".to_string()),
            QueryError::PageOutOfRange(_) => ApiError::BadRequest("Page out of range".to_string()),
        }
    }
}

impl From<LyricsError> for ApiError {
    fn from(err: LyricsError) -> Self {
        match err {
            LyricsError::PageOutOfRange { .. } => ApiError::NotFound("Page out of range".to_string()),
        }
    }
}

impl From<EditError> for ApiError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::MissingFields => ApiError::BadRequest(err.to_string()),
            EditError::InvalidReleaseDate(_) => {
                ApiError::BadRequest("Invalid releaseDate format. Use YYYY-MM-DD".to_string())
            }
        }
    }
}

impl From<EnrichmentError> for ApiError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::NotFound => ApiError::NotFound(err.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", msg),
            ApiError::Common(mlib_common::Error::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
