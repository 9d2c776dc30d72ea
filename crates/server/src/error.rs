//! Unified error handling for the HTTP transport and startup.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::content::ContentError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Support content could not be loaded.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// A transport could not bind, read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON-RPC response could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or wrong bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Whether the failure is on our side rather than the client's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        !matches!(self, Self::Unauthorized(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let (status, message) = if self.is_server_error() {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        } else {
            (StatusCode::UNAUTHORIZED, self.to_string())
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        if matches!(self, Self::Unauthorized(_)) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}
