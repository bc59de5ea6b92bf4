//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout. Generally transient.
    Network,

    /// Backend reported a failure (HTTP 5xx, `status != "success"`, error frame).
    Server,

    /// Malformed data or invalid state on our side.
    Client,

    /// User action required (bad path, empty input).
    User,

    /// OS/filesystem errors.
    System,

    /// Missing or invalid config file.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the Saturday server is running and reachable",
            ErrorCategory::Server => "The server reported a problem. Check its logs and try again",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::System => "Check file paths and permissions",
            ErrorCategory::Configuration => "Check your configuration file",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
