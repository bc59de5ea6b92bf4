//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Request id of the app task that failed, if any.
    pub request_id: Option<String>,

    /// File the operation was working on.
    pub file: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component/module where the error originated.
    pub component: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            request_id: None,
            file: None,
            timestamp: Utc::now(),
            component: None,
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref request_id) = self.request_id {
            parts.push(format!("request_id={}", request_id));
        }
        if let Some(ref file) = self.file {
            parts.push(format!("file={}", file));
        }
        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));
        parts.join(" ")
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new("unknown")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;
        if let Some(ref file) = self.file {
            write!(f, " file={}", file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let ctx = ErrorContext::new("upload")
            .with_file("notes.md")
            .with_request_id("req-1")
            .with_component("client");
        assert_eq!(ctx.operation, "upload");
        assert_eq!(ctx.file.as_deref(), Some("notes.md"));
        assert_eq!(ctx.request_id.as_deref(), Some("req-1"));
        assert_eq!(ctx.component.as_deref(), Some("client"));
    }

    #[test]
    fn test_log_string() {
        let log = ErrorContext::new("ingest").with_request_id("abc").to_log_string();
        assert!(log.starts_with("operation=ingest"));
        assert!(log.contains("request_id=abc"));
        assert!(log.contains("timestamp="));
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorContext::new("status").to_string(), "[status]");
        assert_eq!(
            ErrorContext::new("upload").with_file("a.txt").to_string(),
            "[upload] file=a.txt"
        );
    }
}
