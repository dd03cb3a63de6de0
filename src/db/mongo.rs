//! MongoDB backend.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;

use super::{Backend, DbError};

/// Database queried for the reachability check
const PING_DATABASE: &str = "admin";

/// Connects through the official `mongodb` driver.
///
/// The driver connects lazily, so `connect` issues a `ping` to surface an
/// unreachable server or bad credentials at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoBackend;

impl MongoBackend {
    pub fn new() -> Self {
        Self
    }
}

fn classify(e: MongoError) -> DbError {
    match *e.kind {
        ErrorKind::InvalidArgument { .. } => DbError::Configuration(e.to_string()),
        _ => DbError::Connection(e.to_string()),
    }
}

#[async_trait]
impl Backend for MongoBackend {
    type Client = Client;
    type Database = Database;

    async fn connect(&self, config: &DatabaseConfig) -> Result<Client, DbError> {
        let target = config.target()?;

        let mut options = ClientOptions::parse(target).await.map_err(classify)?;
        let connect_timeout = config.connect_timeout();
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);
        if options.app_name.is_none() {
            options.app_name = config.app_name.clone();
        }

        tracing::debug!(
            hosts = ?options.hosts,
            app_name = ?options.app_name,
            timeout_secs = connect_timeout.as_secs(),
            "Connecting to MongoDB"
        );

        let client = Client::with_options(options).map_err(classify)?;
        client
            .database(PING_DATABASE)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(classify)?;

        Ok(client)
    }

    fn database(&self, client: &Client, name: &str) -> Database {
        client.database(name)
    }

    async fn close(&self, client: Client) {
        client.shutdown().await;
    }
}
