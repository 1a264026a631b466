//! Line reassembly and classification for the listening stream

/// Substring marking a multipart header line
pub const HEADER_MARKER: &str = "Content-Type:";
/// Prefix marking a multipart boundary line
pub const BOUNDARY_PREFIX: &str = "--boundary-";

/// Text waiting for its terminating newline
///
/// Only complete lines leave the buffer. An unterminated tail stays until a
/// later chunk finishes it, or is dropped together with the buffer.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    text: String,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text
    pub fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Remove and return every complete line, in order
    ///
    /// Lines are returned without their `\n`. Everything after the last
    /// newline stays buffered.
    pub fn drain_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.text.rfind('\n') else {
            return Vec::new();
        };

        let remainder = self.text.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.text, remainder);

        complete[..last_newline]
            .split('\n')
            .map(str::to_owned)
            .collect()
    }

    /// Unterminated tail currently held
    pub fn remainder(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// What a complete line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Content-Type: ...` part header
    Header,
    /// `--boundary-...` separator
    Boundary,
    /// Nothing left after trimming
    Blank,
    /// Trimmed text to try as JSON
    Payload(&'a str),
}

/// Classify one complete line
///
/// The header check runs before the boundary check, both on the untrimmed line.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.contains(HEADER_MARKER) {
        return LineKind::Header;
    }
    if line.starts_with(BOUNDARY_PREFIX) {
        return LineKind::Boundary;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Payload(trimmed)
    }
}
