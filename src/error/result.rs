//! Result type alias for Saturday operations.

use super::context::ErrorContext;
use super::saturday_error::SaturdayError;

/// Type alias for Results using SaturdayError.
pub type SaturdayResult<T> = Result<T, SaturdayError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// ```ignore
    /// use saturday::error::{ErrorContext, ResultExt};
    ///
    /// let bytes = tokio::fs::read(&path)
    ///     .await
    ///     .context(ErrorContext::new("upload").with_file(name))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> SaturdayResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> SaturdayResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<SaturdayError>,
{
    fn context(self, ctx: ErrorContext) -> SaturdayResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> SaturdayResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_context_extension() {
        let result: SaturdayResult<i32> = Err(SaturdayError::Network(NetworkError::Other {
            message: "unreachable".to_string(),
        }));
        let err = result.context(ErrorContext::new("test_operation")).unwrap_err();
        assert_eq!(err.context().unwrap().operation, "test_operation");
    }

    #[test]
    fn test_context_extension_preserves_ok() {
        let result: SaturdayResult<i32> = Ok(42);
        assert_eq!(result.context(ErrorContext::new("noop")).unwrap(), 42);
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let result: SaturdayResult<i32> = Ok(42);
        let mut called = false;
        let with_ctx = result.with_context(|| {
            called = true;
            ErrorContext::new("test")
        });
        assert!(with_ctx.is_ok());
        assert!(!called);
    }

    #[test]
    fn test_context_from_io_error() {
        let io_result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "not found"));
        let err = io_result
            .context(ErrorContext::new("read_file").with_file("notes.md"))
            .unwrap_err();
        assert_eq!(err.context().unwrap().operation, "read_file");
        assert_eq!(err.error_code(), "E_SYS_IO");
    }
}
