//! Binds opening and closing the database client to server startup and shutdown.

use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::instrument;

use crate::config::DatabaseConfig;

use super::{Backend, ConnectionHolder, ConnectionStatus, DbError};

/// Owns the connection slot and drives its `Uninitialized -> Connected -> Closed`
/// transitions.
///
/// Constructed once in `main`, shared through `Arc`, and handed to both the
/// server run loop (which calls the hooks) and `AppState` (which handlers read).
///
/// Startup and shutdown hold `transition` for their whole run, so at most one
/// client is ever opened. Reads go straight to the holder and never wait on it.
pub struct Lifecycle<B: Backend> {
    backend: B,
    config: DatabaseConfig,
    holder: ConnectionHolder<B::Client>,
    transition: Mutex<()>,
}

impl<B: Backend> Lifecycle<B> {
    pub fn new(backend: B, config: DatabaseConfig) -> Self {
        Self {
            backend,
            config,
            holder: ConnectionHolder::new(),
            transition: Mutex::new(()),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.holder.status()
    }

    /// Open the client and store it.
    ///
    /// Fails (leaving the state `Uninitialized`) on a bad target, a connection
    /// error, or when the connect timeout elapses. Only valid from `Uninitialized`;
    /// an overlapping call waits for this one and then sees `Connected`.
    #[instrument(name = "db::on_startup", skip(self), fields(database = %self.config.name))]
    pub async fn on_startup(&self) -> Result<(), DbError> {
        let _transition = self.transition.lock().await;

        let status = self.holder.status();
        if status != ConnectionStatus::Uninitialized {
            return Err(DbError::InvalidTransition(status));
        }

        self.config.target()?;

        let connect_timeout = self.config.connect_timeout();
        let client = timeout(connect_timeout, self.backend.connect(&self.config))
            .await
            .map_err(|_| DbError::Timeout(connect_timeout))??;

        self.holder.set(client);
        tracing::info!("Connected to database");
        Ok(())
    }

    /// Close the client if one is held. Safe to call any number of times.
    #[instrument(name = "db::on_shutdown", skip(self))]
    pub async fn on_shutdown(&self) {
        let _transition = self.transition.lock().await;

        match self.holder.take() {
            Some(client) => {
                self.backend.close(client).await;
                tracing::info!("Disconnected from database");
            }
            None => {
                tracing::debug!(status = %self.holder.status(), "No database connection to close");
            }
        }
    }

    /// The configured namespace, or `None` before startup and after shutdown.
    pub fn get_database(&self) -> Option<B::Database> {
        self.holder
            .get()
            .map(|client| self.backend.database(&client, &self.config.name))
    }

    /// Like [`get_database`](Self::get_database) but tells "not yet" from "already closed".
    pub fn database(&self) -> Result<B::Database, DbError> {
        match self.get_database() {
            Some(db) => Ok(db),
            None => match self.holder.status() {
                ConnectionStatus::Closed => Err(DbError::Closed),
                _ => Err(DbError::NotConnected),
            },
        }
    }
}
