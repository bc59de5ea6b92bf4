//! Streaming UTF-8 decoding.
//!
//! Network reads split the body at arbitrary byte offsets, so a multi-byte
//! character can straddle two chunks. The decoder keeps the incomplete tail
//! of one chunk and prepends it to the next.

/// Incremental UTF-8 decoder.
///
/// Invalid sequences are replaced with U+FFFD and decoding continues.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    /// Bytes of an incomplete sequence at the end of the last chunk
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and append the text to `out`.
    ///
    /// A trailing incomplete sequence is held back until the next call.
    pub fn decode(&mut self, bytes: &[u8], out: &mut String) {
        let joined;
        let mut input: &[u8] = if self.pending.is_empty() {
            bytes
        } else {
            self.pending.extend_from_slice(bytes);
            joined = std::mem::take(&mut self.pending);
            &joined
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[bad..];
                        }
                        None => {
                            // Sequence is cut off by the end of the chunk
                            self.pending.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Flush at end of stream. A dangling partial sequence becomes U+FFFD.
    pub fn finish(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            self.pending.clear();
            out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    /// Number of bytes waiting for the rest of their character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
