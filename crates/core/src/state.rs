//! Observable grid state built on watch channels
//!
//! Holds the two values a presentation layer needs: the active cell and the
//! connection state. The decoder task is the only writer. Readers either take
//! a snapshot or subscribe and get woken on every publish.

use std::sync::Arc;
use tokio::sync::watch;

use crate::types::{ConnectionState, Position};

/// Shared handle to the displayed state
///
/// Cloning is cheap (Arc-based); all clones see the same values.
#[derive(Clone, Debug)]
pub struct GridState {
    position: Arc<watch::Sender<Position>>,
    connection: Arc<watch::Sender<ConnectionState>>,
}

impl GridState {
    /// Start at `{0, 0}`, disconnected
    pub fn new() -> Self {
        let (position, _) = watch::channel(Position::default());
        let (connection, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            position: Arc::new(position),
            connection: Arc::new(connection),
        }
    }

    /// Current active cell
    pub fn position(&self) -> Position {
        *self.position.borrow()
    }

    /// Current connection state
    pub fn connection(&self) -> ConnectionState {
        *self.connection.borrow()
    }

    /// Replace the active cell
    ///
    /// Every accepted message publishes, even when the value is unchanged.
    pub fn set_position(&self, position: Position) {
        self.position.send_replace(position);
    }

    /// Set connection state, publishing only on a flip
    ///
    /// Returns true when the state changed.
    pub fn set_connection(&self, state: ConnectionState) -> bool {
        self.connection.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        })
    }

    /// Receiver woken on each position publish
    pub fn subscribe_position(&self) -> watch::Receiver<Position> {
        self.position.subscribe()
    }

    /// Receiver woken on each connection flip
    pub fn subscribe_connection(&self) -> watch::Receiver<ConnectionState> {
        self.connection.subscribe()
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}
