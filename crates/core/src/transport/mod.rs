//! HTTP transport for the grid server
//!
//! This module provides:
//! - The [`StreamSource`]/[`ByteStream`] seam the decoder reads through
//! - The reqwest-backed implementation of that seam
//! - The fixed-delay reconnect policy
//! - The long-running [`StreamDecoder`] task
//! - The fire-and-forget [`UpdateClient`]

pub mod decoder;
pub mod http;
pub mod reconnect;
pub mod update;

pub use decoder::StreamDecoder;
pub use http::HttpStreamSource;
pub use reconnect::{reconnect_config, ReconnectConfig, Reconnector};
pub use update::UpdateClient;

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Something that can open a fresh byte stream on demand
#[async_trait]
pub trait StreamSource: Send + Sync {
    /// Open a new long-lived stream
    ///
    /// Refused connections, transport errors and non-success responses all
    /// fail here.
    async fn open(&self) -> Result<Box<dyn ByteStream>>;

    /// Human readable target for logs
    fn describe(&self) -> String;
}

/// One open stream of body bytes
#[async_trait]
pub trait ByteStream: Send {
    /// Next chunk, `None` once the stream ended cleanly
    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}
