//! HAÜSA ERP API server.
//!
//! This is the application entry point. It loads `.env`, initializes tracing,
//! loads configuration, builds the database lifecycle, and runs the HTTP server
//! until SIGINT/SIGTERM.

use std::sync::Arc;

use axum_server::Handle;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hausa_api::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use hausa_api::db::{Lifecycle, MongoBackend};
use hausa_api::http::{run, setup_shutdown_handler};

/// HAÜSA ERP API server
#[derive(Parser, Debug)]
#[command(name = "hausa-api", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "hausa_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Variables already in the environment win over .env
    let dotenv_path = dotenvy::dotenv().ok();

    // Tracing is configured from the file, so a load error is reported once by main's Err
    let config =
        AppConfig::load(&args.config).map_err(|e| format!("{}: {}", args.config, e))?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }
    tracing::info!(
        config = %args.config,
        database = %config.database.name,
        on_connect_failure = ?config.database.on_connect_failure,
        "Loaded configuration"
    );

    let config = Arc::new(config);
    let db = Arc::new(Lifecycle::new(MongoBackend::new(), config.database.clone()));

    let handle = Handle::new();
    setup_shutdown_handler(handle.clone(), config.http.shutdown_grace());

    if let Err(e) = run(config, db, handle).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
