//! Error types for the VoiceLegal server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// Analysis-provider failures are deliberately absent: they are converted to
/// the fallback report inside the analysis service.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, detail) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Extraction(e) if e.is_client_error() => {
                (StatusCode::BAD_REQUEST, "bad_request", e.to_string())
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "extraction_error", e.to_string())
            }
        };

        (status, Json(ErrorResponse { error: error_type, detail })).into_response()
    }
}
