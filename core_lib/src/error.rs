//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level message for a relay failure; the transport text goes in `details`.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to send email";

/// Top-level message for anything caught at the request boundary.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Server error processing request";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(msg) => json!({ "error": msg }),
            AppError::Transport(details) => {
                tracing::error!("Mail transport error: {}", details);
                json!({
                    "error": TRANSPORT_FAILURE_MESSAGE,
                    "details": details,
                })
            }
            AppError::Unexpected(details) => {
                tracing::error!("Unexpected error: {}", details);
                json!({
                    "error": UNEXPECTED_FAILURE_MESSAGE,
                    "details": details,
                })
            }
            AppError::Config(err) => {
                tracing::error!("Configuration error: {:?}", err);
                json!({
                    "error": UNEXPECTED_FAILURE_MESSAGE,
                    "details": err.to_string(),
                })
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                json!({
                    "error": UNEXPECTED_FAILURE_MESSAGE,
                    "details": err.to_string(),
                })
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                json!({
                    "error": UNEXPECTED_FAILURE_MESSAGE,
                    "details": err.to_string(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
