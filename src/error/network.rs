//! Network-related error types.
//!
//! Errors from single round-trip requests: upload, ingest, status, and the
//! initial handshake of the chat stream.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { message: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Response body did not have the expected shape.
    InvalidResponse { message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => format!(
                "Unable to connect to the server at {}. Is it running?",
                url
            ),
            NetworkError::Timeout { .. } => {
                "The request timed out. The server may be slow or unreachable.".to_string()
            }
            NetworkError::HttpStatus { status, message } => match *status {
                404 => "The requested endpoint was not found.".to_string(),
                500..=599 if !message.is_empty() => message.clone(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { message } => write!(f, "Request timed out: {}", message),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: String::new(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout { message },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::InvalidUrl(message) => NetworkError::ConnectionFailed {
                url: String::new(),
                message: format!("invalid URL: {}", message),
            },
            HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }
}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_timeout() {
        NetworkError::Timeout {
            message: err.to_string(),
        }
    } else if let Some(status) = err.status() {
        NetworkError::HttpStatus {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else if err.is_builder() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: format!("invalid request: {}", err),
        }
    } else if err.is_decode() {
        NetworkError::InvalidResponse {
            message: format!("Failed to decode response: {}", err),
        }
    } else {
        NetworkError::Other {
            message: err.to_string(),
        }
    }
}
