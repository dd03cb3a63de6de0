//! Database connection lifecycle.
//!
//! The connection is opened once before the HTTP listener is bound, read by
//! handlers while the server runs, and closed after the server has drained:
//!
//! ```text
//! Uninitialized --on_startup--> Connected --on_shutdown--> Closed
//! ```
//!
//! The concrete driver sits behind the [`Backend`] trait. [`MongoBackend`] is
//! the production implementation.

mod holder;
mod lifecycle;
mod mongo;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{ConfigError, DatabaseConfig};

pub use holder::{ConnectionHolder, ConnectionState};
pub use lifecycle::Lifecycle;
pub use mongo::MongoBackend;

/// A database driver that can open, scope, and close a client.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Live client handle. Cloning must be cheap and share the underlying connection.
    type Client: Clone + Send + Sync + 'static;
    /// Handle scoped to one logical database (namespace).
    type Database: Send + 'static;

    /// Establish a client and verify the server is reachable.
    async fn connect(&self, config: &DatabaseConfig) -> Result<Self::Client, DbError>;

    /// Select the namespace `name` on a connected client.
    fn database(&self, client: &Self::Client, name: &str) -> Self::Database;

    /// Release the client's network resources.
    async fn close(&self, client: Self::Client);
}

/// Payload-free view of the connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Uninitialized,
    Connected,
    Closed,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Uninitialized => "uninitialized",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connection target missing or malformed
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// Network or authentication failure while connecting
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database connection timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// `on_startup` called outside the `Uninitialized` state
    #[error("Cannot start database connection from state '{0}'")]
    InvalidTransition(ConnectionStatus),

    #[error("Database is not connected yet")]
    NotConnected,

    #[error("Database connection is closed")]
    Closed,
}

impl DbError {
    /// Configuration problems are fatal regardless of the connect-failure policy.
    pub fn is_configuration(&self) -> bool {
        matches!(self, DbError::Configuration(_))
    }
}

impl From<ConfigError> for DbError {
    fn from(e: ConfigError) -> Self {
        DbError::Configuration(e.to_string())
    }
}
