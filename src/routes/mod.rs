//! HTTP route handlers.
//!
//! Probes are never cached; the documentation routes are. Every route is wrapped
//! in the CORS layer and the request-ID middleware, which creates the root span
//! for each request.

pub mod docs;
pub mod health;
pub mod root;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_DOCS, CACHE_CONTROL_NO_STORE};
use crate::db::Backend;
use crate::error::AppError;
use crate::http::cors::cors_layer;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Creates the Axum router with all routes, cache headers, and CORS.
pub fn create_router<B: Backend>(state: AppState<B>) -> Router {
    // Probes - always fresh
    let probe_routes = Router::new()
        .route(health::HEALTH_PATH, get(health::health))
        .route(health::READY_PATH, get(health::ready::<B>))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    let api_routes = Router::new().route(root::ROOT_PATH, get(root::root));

    // Docs - static per release
    let docs_routes = Router::new()
        .route(docs::DOCS_PATH, get(docs::swagger_ui))
        .route(docs::OPENAPI_PATH, get(docs::openapi))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_DOCS),
        ));

    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(probe_routes)
        .merge(api_routes)
        .merge(docs_routes)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
