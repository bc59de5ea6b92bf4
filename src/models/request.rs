use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
///
/// The web-search flag is captured when the message is submitted, so
/// toggling it mid-stream does not affect the request in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub use_web: bool,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, use_web: bool) -> Self {
        Self {
            message: message.into(),
            use_web,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatRequest::new("What is in my notes?", true);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "What is in my notes?", "use_web": true})
        );
    }
}
