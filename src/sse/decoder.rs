//! Synchronous frame decoder.
//!
//! Holds the decode buffer for one response body. Bytes go in through
//! [`FrameDecoder::feed`]; every complete line is resolved before `feed`
//! returns, and the unterminated tail waits for the next call.

use std::time::Duration;

use tracing::debug;

use super::frame::{DecodeError, Frame};
use super::utf8::Utf8StreamDecoder;

/// Marker that introduces a frame payload.
pub const DATA_PREFIX: &str = "data: ";

/// Decoder behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Treat the first malformed frame as fatal to the stream
    pub strict: bool,
    /// Decode an unterminated last line instead of dropping it
    pub flush_trailing_line: bool,
    /// Abort the stream if no bytes arrive for this long
    pub idle_timeout: Option<Duration>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_flush_trailing_line(mut self, flush: bool) -> Self {
        self.flush_trailing_line = flush;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

/// Parse one complete line.
///
/// Returns `Ok(None)` for lines that carry no frame: anything without the
/// `data: ` marker, and frames whose `type` this client does not know.
pub fn parse_frame_line(line: &str, line_no: usize) -> Result<Option<Frame>, DecodeError> {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Ok(None);
    };

    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| DecodeError::InvalidJson {
            line: line_no,
            payload: DecodeError::preview(payload),
            message: e.to_string(),
        })?;

    let frame_type = match value.get("type").and_then(|t| t.as_str()) {
        Some(t) => t.to_string(),
        None => {
            return Err(DecodeError::MissingType {
                line: line_no,
                payload: DecodeError::preview(payload),
            })
        }
    };

    if !Frame::is_known_type(&frame_type) {
        debug!("Ignoring frame with unknown type '{}'", frame_type);
        return Ok(None);
    }

    serde_json::from_value::<Frame>(value)
        .map(Some)
        .map_err(|e| DecodeError::InvalidFields {
            line: line_no,
            frame_type,
            message: e.to_string(),
        })
}

/// Incremental decoder for one chat response body.
///
/// Never shared between requests. Each streaming call creates its own.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8StreamDecoder,
    /// Text received but not yet resolved into a complete line
    buffer: String,
    options: DecodeOptions,
    lines_seen: usize,
    dropped_trailing_bytes: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Feed raw bytes and return every frame (or line error) they complete,
    /// in line order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<Frame, DecodeError>> {
        self.utf8.decode(bytes, &mut self.buffer);
        self.drain_lines()
    }

    /// Signal end of stream.
    ///
    /// The leftover partial line is dropped unless
    /// [`DecodeOptions::flush_trailing_line`] is set.
    pub fn finish(&mut self) -> Vec<Result<Frame, DecodeError>> {
        self.utf8.finish(&mut self.buffer);
        let rest = std::mem::take(&mut self.buffer);
        if rest.is_empty() {
            return Vec::new();
        }

        if self.options.flush_trailing_line {
            self.lines_seen += 1;
            let line = rest.strip_suffix('\r').unwrap_or(&rest);
            return parse_frame_line(line, self.lines_seen)
                .transpose()
                .into_iter()
                .collect();
        }

        debug!(
            "Dropping {} bytes of unterminated trailing line",
            rest.len()
        );
        self.dropped_trailing_bytes += rest.len();
        Vec::new()
    }

    /// Bytes of text waiting for a newline.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() + self.utf8.pending_len()
    }

    /// Bytes discarded by [`finish`](Self::finish).
    pub fn dropped_trailing_bytes(&self) -> usize {
        self.dropped_trailing_bytes
    }

    /// Complete lines processed so far.
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    fn drain_lines(&mut self) -> Vec<Result<Frame, DecodeError>> {
        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        let mut results = Vec::new();
        for raw in complete.split_terminator('\n') {
            self.lines_seen += 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            match parse_frame_line(line, self.lines_seen) {
                Ok(Some(frame)) => results.push(Ok(frame)),
                Ok(None) => {}
                Err(e) => results.push(Err(e)),
            }
        }
        results
    }
}
