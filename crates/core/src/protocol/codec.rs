//! Bytes → position updates for the `/listening` stream

use tracing::trace;

use super::buffer::{classify, LineKind, StreamBuffer};
use super::utf8::Utf8StreamDecoder;
use crate::types::{Position, StreamMessage};

/// Counters for one connection, reported when it ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Complete lines seen
    pub lines: u64,
    /// Boundary and header lines
    pub framing: u64,
    /// Payload lines that failed to parse
    pub malformed: u64,
    /// Well-formed messages with a type other than `position`
    pub ignored: u64,
    /// Position updates emitted
    pub positions: u64,
}

/// Incremental decoder for one connection
///
/// Feed raw body chunks in arrival order; each call returns the positions
/// completed by that chunk, in wire order. Create a fresh decoder per
/// connection so nothing from a dropped stream leaks into the next one.
#[derive(Debug, Default)]
pub struct PositionDecoder {
    utf8: Utf8StreamDecoder,
    buffer: StreamBuffer,
    stats: DecodeStats,
}

impl PositionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Position> {
        let text = self.utf8.decode(chunk);
        self.buffer.push(&text);

        let mut positions = Vec::new();
        for line in self.buffer.drain_lines() {
            if let Some(position) = self.decode_line(&line) {
                positions.push(position);
            }
        }
        positions
    }

    fn decode_line(&mut self, line: &str) -> Option<Position> {
        self.stats.lines += 1;

        let payload = match classify(line) {
            LineKind::Header | LineKind::Boundary => {
                self.stats.framing += 1;
                return None;
            }
            LineKind::Blank => return None,
            LineKind::Payload(payload) => payload,
        };

        match StreamMessage::from_line(payload) {
            Ok(message) => match message.position() {
                Some(position) => {
                    self.stats.positions += 1;
                    Some(position)
                }
                None => {
                    self.stats.ignored += 1;
                    None
                }
            },
            Err(e) => {
                trace!("Skipping non-JSON line ({}): {:?}", e, payload);
                self.stats.malformed += 1;
                None
            }
        }
    }

    /// Text waiting for a newline
    pub fn buffered(&self) -> &str {
        self.buffer.remainder()
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }
}
