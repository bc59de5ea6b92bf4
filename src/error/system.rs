//! System-related error types.
//!
//! Filesystem failures, mostly from reading files to upload.

use std::fmt;
use std::path::PathBuf;

/// System-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemError {
    /// File not found.
    FileNotFound { path: PathBuf },

    /// Permission denied for file/directory operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Generic system error.
    Other { message: String },
}

impl SystemError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SystemError::FileNotFound { path } => {
                format!("File not found: '{}'", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                format!("Permission denied: Cannot {} '{}'.", operation, path.display())
            }
            SystemError::IoError {
                operation, path, ..
            } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            SystemError::Other { message } => format!("System error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::FileNotFound { .. } => "E_SYS_FILE_NOT_FOUND",
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::Other { .. } => "E_SYS_OTHER",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::FileNotFound { path } => {
                write!(f, "File not found: '{}'", path.display())
            }
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied: {} '{}'", operation, path.display())
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(
                    f,
                    "I/O error during {} at '{}': {}",
                    operation,
                    p.display(),
                    message
                ),
                None => write!(f, "I/O error during {}: {}", operation, message),
            },
            SystemError::Other { message } => write!(f, "System error: {}", message),
        }
    }
}

impl std::error::Error for SystemError {}

/// Classify an I/O error into a SystemError.
pub fn classify_io_error(err: std::io::Error, path: Option<PathBuf>, operation: &str) -> SystemError {
    use std::io::ErrorKind;

    match (err.kind(), path) {
        (ErrorKind::NotFound, Some(path)) => SystemError::FileNotFound { path },
        (ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        (_, path) => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}
