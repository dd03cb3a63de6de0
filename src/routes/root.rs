//! API root: a welcome message pointing at the docs and the health probe.

use axum::Json;
use serde::Serialize;

use crate::config::SERVICE_NAME;

use super::docs::DOCS_PATH;
use super::health::HEALTH_PATH;

pub const ROOT_PATH: &str = "/api/";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub documentation: &'static str,
    pub health: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", SERVICE_NAME),
        documentation: DOCS_PATH,
        health: HEALTH_PATH,
    })
}
