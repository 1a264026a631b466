//! Decoding of the multipart-like `/listening` stream
//!
//! Raw body chunks go through three stages:
//! - incremental UTF-8 decoding ([`Utf8StreamDecoder`])
//! - newline reassembly ([`StreamBuffer`])
//! - framing filter and JSON decoding ([`PositionDecoder`])

mod buffer;
mod codec;
mod utf8;

pub use buffer::{classify, LineKind, StreamBuffer, BOUNDARY_PREFIX, HEADER_MARKER};
pub use codec::{DecodeStats, PositionDecoder};
pub use utf8::Utf8StreamDecoder;
