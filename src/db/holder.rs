//! Slot holding the live database client.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::ConnectionStatus;

/// Connection state with the client carried in the connected variant.
#[derive(Debug)]
pub enum ConnectionState<C> {
    Uninitialized,
    Connected(C),
    Closed,
}

impl<C> ConnectionState<C> {
    pub fn status(&self) -> ConnectionStatus {
        match self {
            ConnectionState::Uninitialized => ConnectionStatus::Uninitialized,
            ConnectionState::Connected(_) => ConnectionStatus::Connected,
            ConnectionState::Closed => ConnectionStatus::Closed,
        }
    }
}

/// Holds at most one client. Reads are lock-free; writes happen only at startup
/// and shutdown and are single atomic swaps.
pub struct ConnectionHolder<C> {
    state: ArcSwap<ConnectionState<C>>,
}

impl<C: Clone> ConnectionHolder<C> {
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(ConnectionState::Uninitialized),
        }
    }

    /// Store `client`, replacing whatever was there.
    pub fn set(&self, client: C) {
        self.state.store(Arc::new(ConnectionState::Connected(client)));
    }

    /// Current client, if connected.
    pub fn get(&self) -> Option<C> {
        match &**self.state.load() {
            ConnectionState::Connected(client) => Some(client.clone()),
            _ => None,
        }
    }

    /// Drop the client. No-op unless connected.
    pub fn clear(&self) {
        self.take();
    }

    /// Atomically move `Connected` to `Closed`, returning the removed client.
    pub fn take(&self) -> Option<C> {
        let previous = self.state.rcu(|current| match &**current {
            ConnectionState::Connected(_) => Arc::new(ConnectionState::Closed),
            _ => Arc::clone(current),
        });

        match &*previous {
            ConnectionState::Connected(client) => Some(client.clone()),
            _ => None,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.load().status()
    }
}

impl<C: Clone> Default for ConnectionHolder<C> {
    fn default() -> Self {
        Self::new()
    }
}
