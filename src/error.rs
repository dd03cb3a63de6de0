use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io;

use crate::config::ConfigError;
use crate::db::{ConnectionStatus, DbError};

/// Errors returned by request handlers.
///
/// Rendered as `{"detail": "..."}`, the error shape API clients of this service
/// already expect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(ConnectionStatus),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Failures that stop the process before it serves traffic.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Invalid http.host or http.port: {0}")]
    InvalidAddress(String),

    #[error("Server error: {0}")]
    Io(#[from] io::Error),
}
