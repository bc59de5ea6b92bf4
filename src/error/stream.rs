//! Streaming-related error types.
//!
//! Errors that end a chat response stream. A single malformed frame line is
//! not one of these; see [`crate::sse::DecodeError`].

use std::fmt;
use std::time::Duration;

use crate::traits::HttpError;

/// Stream-specific error variants.
///
/// Every variant is fatal to the decode loop that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Transport failed while reading the body.
    ConnectionLost { message: String },

    /// No bytes arrived within the configured idle timeout.
    Timeout { idle: Duration },

    /// A malformed frame in strict mode.
    InvalidFrame { message: String },
}

/// Whole seconds when exact, milliseconds otherwise.
fn format_idle(idle: &Duration) -> String {
    if idle.subsec_nanos() == 0 && idle.as_secs() > 0 {
        format!("{} seconds", idle.as_secs())
    } else {
        format!("{} ms", idle.as_millis())
    }
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::ConnectionLost { .. } | StreamError::Timeout { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { message } => format!("Connection error: {}", message),
            StreamError::Timeout { idle } => format!(
                "No response from server for {}. The connection may have been lost.",
                format_idle(idle)
            ),
            StreamError::InvalidFrame { .. } => {
                "Received invalid data from server. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::InvalidFrame { .. } => "E_STREAM_FRAME",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::Timeout { idle } => {
                write!(f, "Stream timeout after {}", format_idle(idle))
            }
            StreamError::InvalidFrame { message } => write!(f, "Invalid frame: {}", message),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        StreamError::ConnectionLost {
            message: err.to_string(),
        }
    }
}
