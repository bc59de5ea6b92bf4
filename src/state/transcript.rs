//! Chat transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// Why an assistant message ended without an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageError {
    /// The server sent an error frame
    Server(String),
    /// The request or stream failed in transport
    Connection(String),
    /// The server answered, but not with a usable stream
    Request(String),
}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageError::Server(msg) => write!(f, "Error: {}", msg),
            MessageError::Connection(msg) => write!(f, "Connection error: {}", msg),
            MessageError::Request(msg) => write!(f, "Request failed: {}", msg),
        }
    }
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    /// Documents the answer was grounded on
    pub sources: Vec<String>,
    pub error: Option<MessageError>,
    /// Still receiving chunks
    pub streaming: bool,
    /// Stopped by the user before the stream ended
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text.into(), false)
    }

    /// Empty assistant message waiting for its first chunk.
    pub fn assistant_placeholder() -> Self {
        Self::new(Author::Assistant, String::new(), true)
    }

    fn new(author: Author, text: String, streaming: bool) -> Self {
        Self {
            author,
            text,
            sources: Vec::new(),
            error: None,
            streaming,
            cancelled: false,
            created_at: Utc::now(),
        }
    }

    /// True while streaming and nothing has arrived yet.
    pub fn is_thinking(&self) -> bool {
        self.streaming && self.text.is_empty() && self.error.is_none()
    }

    /// Text to show for this message.
    pub fn display_text(&self) -> String {
        match &self.error {
            Some(err) => err.to_string(),
            None if self.is_thinking() => "Thinking...".to_string(),
            None => self.text.clone(),
        }
    }
}
