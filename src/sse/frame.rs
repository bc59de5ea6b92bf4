//! Event frame types for the chat streaming API.
//!
//! The server sends one JSON object per `data: ` line. The `type` field
//! selects the variant; the remaining fields depend on it.

use serde::{Deserialize, Serialize};

/// Typed frame decoded from one `data: ` line of a chat stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// Incremental fragment of the assistant's answer
    Chunk { content: String },
    /// Documents the answer was grounded on, in server order
    Sources { sources: Vec<String> },
    /// Server-side failure while producing the answer
    Error { message: String },
    /// End-of-answer marker sent after the last chunk/sources frame
    Done,
}

impl Frame {
    /// Tags this client knows how to decode. Any other tag is skipped.
    pub const KNOWN_TYPES: [&'static str; 4] = ["chunk", "sources", "error", "done"];

    /// Returns the wire tag for this frame.
    pub fn type_name(&self) -> &'static str {
        match self {
            Frame::Chunk { .. } => "chunk",
            Frame::Sources { .. } => "sources",
            Frame::Error { .. } => "error",
            Frame::Done => "done",
        }
    }

    /// Whether `tag` names a variant this client decodes.
    pub fn is_known_type(tag: &str) -> bool {
        Self::KNOWN_TYPES.contains(&tag)
    }
}

/// Error for a single malformed `data: ` line.
///
/// Scoped to one line: the decoder keeps going after reporting it unless
/// strict mode is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload after the marker is not valid JSON
    InvalidJson {
        line: usize,
        payload: String,
        message: String,
    },
    /// Payload is JSON but has no string `type` field
    MissingType { line: usize, payload: String },
    /// Known `type` whose fields are missing or have the wrong shape
    InvalidFields {
        line: usize,
        frame_type: String,
        message: String,
    },
}

/// Longest payload excerpt kept inside a [`DecodeError`].
const PAYLOAD_PREVIEW_CHARS: usize = 80;

impl DecodeError {
    /// 1-based line number within the stream.
    pub fn line(&self) -> usize {
        match self {
            DecodeError::InvalidJson { line, .. }
            | DecodeError::MissingType { line, .. }
            | DecodeError::InvalidFields { line, .. } => *line,
        }
    }

    pub(crate) fn preview(payload: &str) -> String {
        if payload.chars().count() <= PAYLOAD_PREVIEW_CHARS {
            payload.to_string()
        } else {
            let cut: String = payload.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
            format!("{}...", cut)
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidJson {
                line,
                payload,
                message,
            } => write!(
                f,
                "Invalid JSON on line {}: {} (data: {})",
                line, message, payload
            ),
            DecodeError::MissingType { line, payload } => {
                write!(f, "Frame on line {} has no type: {}", line, payload)
            }
            DecodeError::InvalidFields {
                line,
                frame_type,
                message,
            } => write!(
                f,
                "Invalid '{}' frame on line {}: {}",
                frame_type, line, message
            ),
        }
    }
}

impl std::error::Error for DecodeError {}
