//! Liveness and readiness probes for the hosting platform.
//!
//! `/api/health` is a pure liveness probe: it answers as long as the process can
//! respond to HTTP and never looks at the database. `/api/ready` reports whether
//! the database connection is up, so a load balancer can hold traffic while
//! the service runs degraded.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::{SERVICE_NAME, SERVICE_VERSION};
use crate::db::{Backend, ConnectionStatus};
use crate::error::AppError;
use crate::state::AppState;

pub const HEALTH_PATH: &str = "/api/health";
pub const READY_PATH: &str = "/api/ready";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub database: ConnectionStatus,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}

/// Readiness handler. 503 unless the database is connected.
pub async fn ready<B: Backend>(
    State(state): State<AppState<B>>,
) -> Result<Json<ReadyResponse>, AppError> {
    match state.db.status() {
        ConnectionStatus::Connected => Ok(Json(ReadyResponse {
            status: "ready",
            database: ConnectionStatus::Connected,
        })),
        other => Err(AppError::DatabaseUnavailable(other)),
    }
}
