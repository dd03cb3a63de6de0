//! HAÜSA ERP API
//!
//! HTTP service scaffold for the HAÜSA construction ERP. It owns the MongoDB
//! connection lifecycle (connect before serving, disconnect after draining)
//! and exposes health, readiness and documentation endpoints.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, StartupError};
pub use state::AppState;
