//! Unified error type for the Saturday client.
//!
//! `SaturdayError` wraps every domain error so the app and CLI can
//! categorize, log, and render failures uniformly.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::stream::StreamError;
use super::system::SystemError;
use crate::config::ConfigError;
use crate::traits::HttpError;

/// Unified error type for the Saturday client.
#[derive(Debug)]
pub enum SaturdayError {
    /// Network-related errors (connections, HTTP, timeouts).
    Network(NetworkError),

    /// Chat stream errors.
    Stream(StreamError),

    /// System/filesystem errors.
    System(SystemError),

    /// Server answered but reported failure (`status != "success"`).
    Rejected { operation: String, message: String },

    /// Config file could not be loaded.
    Config(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<SaturdayError>,
        context: ErrorContext,
    },
}

impl SaturdayError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SaturdayError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            SaturdayError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            SaturdayError::Network(_) => ErrorCategory::Network,
            SaturdayError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } | StreamError::Timeout { .. } => {
                    ErrorCategory::Network
                }
                StreamError::InvalidFrame { .. } => ErrorCategory::Client,
            },
            SaturdayError::System(SystemError::FileNotFound { .. }) => ErrorCategory::User,
            SaturdayError::System(_) => ErrorCategory::System,
            SaturdayError::Rejected { .. } => ErrorCategory::Server,
            SaturdayError::Config(_) => ErrorCategory::Configuration,
            SaturdayError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            SaturdayError::Network(err) => err.is_retryable(),
            SaturdayError::Stream(err) => err.is_retryable(),
            SaturdayError::System(_) => false,
            SaturdayError::Rejected { .. } => false,
            SaturdayError::Config(_) => false,
            SaturdayError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Context is left out; it is for logs only.
    pub fn user_message(&self) -> String {
        match self {
            SaturdayError::Network(err) => err.user_message(),
            SaturdayError::Stream(err) => err.user_message(),
            SaturdayError::System(err) => err.user_message(),
            SaturdayError::Rejected { message, .. } => message.clone(),
            SaturdayError::Config(err) => err.to_string(),
            SaturdayError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SaturdayError::Network(err) => err.error_code(),
            SaturdayError::Stream(err) => err.error_code(),
            SaturdayError::System(err) => err.error_code(),
            SaturdayError::Rejected { .. } => "E_REJECTED",
            SaturdayError::Config(_) => "E_CONFIG",
            SaturdayError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        SaturdayError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            SaturdayError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &SaturdayError {
        match self {
            SaturdayError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for SaturdayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturdayError::Network(err) => write!(f, "{}", err),
            SaturdayError::Stream(err) => write!(f, "{}", err),
            SaturdayError::System(err) => write!(f, "{}", err),
            SaturdayError::Rejected { operation, message } => {
                write!(f, "{} rejected by server: {}", operation, message)
            }
            SaturdayError::Config(err) => write!(f, "{}", err),
            SaturdayError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for SaturdayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaturdayError::Network(err) => Some(err),
            SaturdayError::Stream(err) => Some(err),
            SaturdayError::System(err) => Some(err),
            SaturdayError::Rejected { .. } => None,
            SaturdayError::Config(err) => Some(err),
            SaturdayError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for SaturdayError {
    fn from(err: NetworkError) -> Self {
        SaturdayError::Network(err)
    }
}

impl From<StreamError> for SaturdayError {
    fn from(err: StreamError) -> Self {
        SaturdayError::Stream(err)
    }
}

impl From<SystemError> for SaturdayError {
    fn from(err: SystemError) -> Self {
        SaturdayError::System(err)
    }
}

impl From<ConfigError> for SaturdayError {
    fn from(err: ConfigError) -> Self {
        SaturdayError::Config(err)
    }
}

impl From<HttpError> for SaturdayError {
    fn from(err: HttpError) -> Self {
        SaturdayError::Network(err.into())
    }
}

// ============================================================================
// From implementations for external error types
// ============================================================================

impl From<std::io::Error> for SaturdayError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        SaturdayError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for SaturdayError {
    fn from(err: serde_json::Error) -> Self {
        SaturdayError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for SaturdayError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        SaturdayError::Network(super::network::classify_reqwest_error(&err, &url))
    }
}
