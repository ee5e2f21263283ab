use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Image generation failed: {0}")]
    Upstream(#[from] ProviderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

/// Error body shared by every failure path.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, validation_message(errors))
            }
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            // Full upstream detail stays in the logs; the client gets the
            // fixed generic message.
            AppError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream image generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate image".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Config(err) => {
                tracing::error!(error = ?err, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error,
                timestamp: Utc::now(),
            }),
        )
            .into_response()
    }
}

/// First human-readable message out of a validator error set.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
