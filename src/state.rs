//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{Backend, Lifecycle, MongoBackend};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration and the database lifecycle. The lifecycle is the
/// same instance the server run loop starts and stops, so handlers observe its
/// transitions.
pub struct AppState<B: Backend = MongoBackend> {
    pub config: Arc<AppConfig>,
    pub db: Arc<Lifecycle<B>>,
}

impl<B: Backend> AppState<B> {
    pub fn new(config: Arc<AppConfig>, db: Arc<Lifecycle<B>>) -> Self {
        Self { config, db }
    }
}

// Manual impl so `B` itself need not be `Clone`
impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            db: Arc::clone(&self.db),
        }
    }
}
