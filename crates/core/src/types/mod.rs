//! Domain types for the grid client

mod connection;
mod message;
mod position;

pub use connection::ConnectionState;
pub use message::{StreamMessage, UpdateRequest};
pub use position::Position;
