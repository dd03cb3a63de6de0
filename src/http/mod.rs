//! HTTP server module.
//!
//! The server run loop owns the database lifecycle hooks: the connection is
//! opened before the listener is bound and closed after the listener has
//! stopped and in-flight requests have drained.

pub mod cors;
mod server;
mod shutdown;

pub use server::{bind_address, run};
pub use shutdown::{setup_shutdown_handler, shutdown_signal};
