//! In-memory database backend for exercising the lifecycle without MongoDB.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use hausa_api::config::{AppConfig, DatabaseConfig};
use hausa_api::db::{Backend, DbError, Lifecycle};

pub const TEST_URL: &str = "mongodb://test-db:27017";

#[derive(Default)]
pub struct Counters {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
}

impl Counters {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Namespace handle returned by [`MemoryBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDatabase {
    pub url: String,
    pub name: String,
}

pub struct MemoryBackend {
    pub reachable: bool,
    pub counters: Arc<Counters>,
}

#[async_trait]
impl Backend for MemoryBackend {
    type Client = Arc<String>;
    type Database = MemoryDatabase;

    async fn connect(&self, config: &DatabaseConfig) -> Result<Self::Client, DbError> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(DbError::Connection("server selection failed".to_string()));
        }
        Ok(Arc::new(config.target()?.to_string()))
    }

    fn database(&self, client: &Self::Client, name: &str) -> MemoryDatabase {
        MemoryDatabase {
            url: client.to_string(),
            name: name.to_string(),
        }
    }

    async fn close(&self, _client: Self::Client) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Config for tests: loopback, ephemeral port, short grace period.
pub fn test_config(url: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.http.host = "127.0.0.1".to_string();
    config.http.port = 0;
    config.http.shutdown_grace_seconds = 1;
    config.database.url = url.map(str::to_string);
    config
}

pub fn lifecycle(
    config: &AppConfig,
    reachable: bool,
) -> (Arc<Lifecycle<MemoryBackend>>, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let backend = MemoryBackend {
        reachable,
        counters: Arc::clone(&counters),
    };
    (
        Arc::new(Lifecycle::new(backend, config.database.clone())),
        counters,
    )
}
