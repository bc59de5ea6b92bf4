use serde::{Deserialize, Serialize};

/// Response of `POST /api/upload` and `POST /api/ingest`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Stored file name (upload only)
    #[serde(default)]
    pub filename: Option<String>,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Response of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub files_count: u64,
    #[serde(default)]
    pub files: Vec<String>,
    /// Set when the server reports `"status": "error"`
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// Error body produced by the server framework for failed requests.
///
/// `detail` is usually a string, but validation failures send a list.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Extract a readable message from an error response body.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ErrorDetail = serde_json::from_str(body).ok()?;
        match parsed.detail {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_response_upload() {
        let response: ActionResponse = serde_json::from_str(
            r#"{"status":"success","filename":"notes.md","message":"Uploaded notes.md"}"#,
        )
        .unwrap();
        assert!(response.is_success());
        assert_eq!(response.filename.as_deref(), Some("notes.md"));
    }

    #[test]
    fn test_action_response_minimal() {
        let response: ActionResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(!response.is_success());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_status_response() {
        let response: StatusResponse = serde_json::from_str(
            r#"{"status":"online","files_count":2,"files":["a.txt","b.pdf"]}"#,
        )
        .unwrap();
        assert!(response.is_online());
        assert_eq!(response.files_count, 2);
        assert_eq!(response.files.len(), 2);

        let error: StatusResponse =
            serde_json::from_str(r#"{"status":"error","message":"no data dir"}"#).unwrap();
        assert!(!error.is_online());
        assert_eq!(error.files_count, 0);
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            ErrorDetail::message_from(r#"{"detail":"Disk full"}"#).as_deref(),
            Some("Disk full")
        );
        assert!(ErrorDetail::message_from(r#"{"detail":[{"msg":"field required"}]}"#)
            .unwrap()
            .contains("field required"));
        assert_eq!(ErrorDetail::message_from("Internal Server Error"), None);
    }
}
