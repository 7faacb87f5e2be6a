//! Application error types.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;
use vmum_core::relay::RelayError;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream request failed")]
    UpstreamFailed(Value),

    #[error("Upstream returned no reply")]
    UpstreamEmpty,

    #[error("Upstream timed out after {0:?}")]
    UpstreamTimeout(Duration),

    #[error("Origin not allowed: {0}")]
    OriginNotAllowed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m, None),
            AppError::InvalidBody(reason) => (
                StatusCode::BAD_REQUEST,
                "invalid request body".to_string(),
                Some(json!({ "reason": reason })),
            ),
            AppError::Configuration(m) => (StatusCode::INTERNAL_SERVER_ERROR, m, None),
            AppError::UpstreamFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "request to completion service failed".to_string(),
                Some(details),
            ),
            AppError::UpstreamEmpty => (
                StatusCode::BAD_GATEWAY,
                "no reply from model".to_string(),
                None,
            ),
            AppError::UpstreamTimeout(after) => (
                StatusCode::GATEWAY_TIMEOUT,
                "completion service timed out".to_string(),
                Some(json!({ "timeoutSecs": after.as_secs_f64() })),
            ),
            AppError::OriginNotAllowed(_) => {
                (StatusCode::FORBIDDEN, "origin not allowed".to_string(), None)
            }
        };
        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::MissingMessage => AppError::Validation(e.to_string()),
            RelayError::MissingApiKey => AppError::Configuration(e.to_string()),
            RelayError::Upstream(inner) => AppError::UpstreamFailed(inner.details()),
            RelayError::EmptyReply => AppError::UpstreamEmpty,
            RelayError::Timeout(after) => AppError::UpstreamTimeout(after),
        }
    }
}
