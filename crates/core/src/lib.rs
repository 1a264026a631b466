//! Gridlink Core - streamed grid-position client
//!
//! This crate provides:
//! - Domain types (positions, stream messages, connection state)
//! - Incremental decoding of the multipart-like `/listening` stream
//! - Observable grid state for presentation layers
//! - HTTP transport with fixed-delay reconnection
//! - Error types

/// Cells per side of the grid
pub const GRID_SIZE: i64 = 8;
/// Server used when no other base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://websocket-server-6g7i.onrender.com";
/// Fixed delay between reconnect attempts
pub const RECONNECT_DELAY_MS: u64 = 3000;

pub mod config;
pub mod error;
pub mod protocol;
pub mod state;
pub mod transport;
pub mod types;

// Re-export common types
pub use config::ClientConfig;
pub use error::{CoreError, Result};
pub use protocol::PositionDecoder;
pub use state::GridState;
pub use transport::{HttpStreamSource, ReconnectConfig, StreamDecoder, UpdateClient};
pub use types::{ConnectionState, Position, StreamMessage, UpdateRequest};
