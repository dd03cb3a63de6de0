//! HTTP server startup logic.

use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::Handle;

use crate::config::{AppConfig, ConnectFailurePolicy, HttpServerConfig};
use crate::db::{Backend, Lifecycle};
use crate::error::StartupError;
use crate::routes::create_router;
use crate::state::AppState;

/// Parse the listen address from `http.host` and `http.port`.
pub fn bind_address(http: &HttpServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", http.host, http.port)
        .parse()
        .map_err(|e| StartupError::InvalidAddress(format!("{}:{} ({})", http.host, http.port, e)))
}

/// Open the database according to the configured failure policy.
async fn start_database<B: Backend>(
    db: &Lifecycle<B>,
    policy: ConnectFailurePolicy,
) -> Result<(), StartupError> {
    let Err(e) = db.on_startup().await else {
        return Ok(());
    };

    if e.is_configuration() || policy == ConnectFailurePolicy::Exit {
        tracing::error!(error = %e, "Database startup failed");
        return Err(e.into());
    }

    tracing::warn!(
        error = %e,
        "Database unavailable, serving without it (database.on_connect_failure = \"continue\")"
    );
    Ok(())
}

/// Run the server until `handle` is told to shut down.
///
/// Sequence: connect the database, bind, serve, then (after the listener has
/// closed and connections drained) disconnect the database. A startup failure
/// returns before anything is bound.
pub async fn run<B: Backend>(
    config: Arc<AppConfig>,
    db: Arc<Lifecycle<B>>,
    handle: Handle,
) -> Result<(), StartupError> {
    let addr = bind_address(&config.http)?;

    start_database(&db, config.database.on_connect_failure).await?;

    let state = AppState::new(Arc::clone(&config), Arc::clone(&db));
    let app = create_router(state);

    tracing::info!(%addr, database = %db.status(), "Starting HTTP server");

    let served = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await;

    // No request handler is running past this point
    db.on_shutdown().await;

    served?;
    tracing::info!("Server shutdown complete");
    Ok(())
}
