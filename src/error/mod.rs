//! Unified error handling for the Saturday client.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network, Stream and System errors
//! - **Unified Error Type**: `SaturdayError` consolidates all error types
//! - **Error Context**: Debugging information attached to errors
//! - **Result Type Alias**: `SaturdayResult<T>`
//!
//! Malformed frame lines are reported separately as
//! [`crate::sse::DecodeError`]; they only become a [`StreamError`] in strict
//! mode.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | 5xx, rejected request, error frame | Yes |
//! | Client | Malformed response data | No |
//! | User | Bad path, cancelled stream | No |
//! | System | OS/filesystem errors | No |
//! | Configuration | Config issues | No |

mod category;
mod context;
mod network;
mod result;
mod saturday_error;
mod stream;
mod system;

pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::{classify_reqwest_error, NetworkError};
pub use result::{ResultExt, SaturdayResult};
pub use saturday_error::SaturdayError;
pub use stream::StreamError;
pub use system::{classify_io_error, SystemError};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let errors: Vec<SaturdayError> = vec![
            NetworkError::Timeout {
                message: "30s".to_string(),
            }
            .into(),
            StreamError::ConnectionLost {
                message: "lost".to_string(),
            }
            .into(),
            SystemError::FileNotFound {
                path: std::path::PathBuf::from("notes.md"),
            }
            .into(),
            SaturdayError::Rejected {
                operation: "ingest".to_string(),
                message: "Ingestion failed".to_string(),
            },
        ];

        for err in &errors {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
            assert!(!err.recovery_hint().is_empty());
        }
    }

    #[test]
    fn test_retry_logic() {
        let retryable: Vec<SaturdayError> = vec![
            NetworkError::ConnectionFailed {
                url: "http://127.0.0.1:8081".to_string(),
                message: "refused".to_string(),
            }
            .into(),
            StreamError::Timeout {
                idle: std::time::Duration::from_secs(10),
            }
            .into(),
        ];
        for err in retryable {
            assert!(err.is_retryable(), "Expected {:?} to be retryable", err);
        }

        let permanent: Vec<SaturdayError> = vec![
            StreamError::InvalidFrame {
                message: "bad".to_string(),
            }
            .into(),
            SystemError::FileNotFound {
                path: std::path::PathBuf::from("/x"),
            }
            .into(),
        ];
        for err in permanent {
            assert!(!err.is_retryable(), "Expected {:?} to not be retryable", err);
        }
    }
}
