//! Incremental UTF-8 decoding for chunked HTTP bodies
//!
//! Network chunks may end in the middle of a multi-byte character. The decoder
//! keeps the incomplete tail and completes it with the next chunk, so splitting
//! the same bytes differently never changes the decoded text.

use std::borrow::Cow;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Stateful bytes → text decoder
///
/// Invalid sequences decode to U+FFFD. A leading byte order mark is dropped.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
    started: bool,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, holding back an incomplete trailing sequence
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes: Cow<'_, [u8]> = if self.pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        if !self.started && !out.is_empty() {
            self.started = true;
            if out.starts_with(BYTE_ORDER_MARK) {
                out.replace_range(..BYTE_ORDER_MARK.len_utf8(), "");
            }
        }

        out
    }

    /// Bytes held back waiting for the rest of a character
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
