//! AppMessage enum for async communication within the application.

use uuid::Uuid;

use crate::models::StatusResponse;
use crate::sse::{DecodeSummary, Frame};
use crate::state::MessageError;

/// Why a chat request ended without a complete stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFailure {
    /// The server could not be reached or the stream broke off
    Connection(String),
    /// HTTP error status, rejected frame or unreadable response
    Request(String),
}

impl ChatFailure {
    pub fn message(&self) -> &str {
        match self {
            ChatFailure::Connection(message) | ChatFailure::Request(message) => message,
        }
    }

    /// Notification text for this failure.
    pub fn notification(&self) -> String {
        match self {
            ChatFailure::Connection(message) => format!("Connection error: {}", message),
            ChatFailure::Request(message) => format!("Request failed: {}", message),
        }
    }
}

impl From<ChatFailure> for MessageError {
    fn from(failure: ChatFailure) -> Self {
        match failure {
            ChatFailure::Connection(message) => MessageError::Connection(message),
            ChatFailure::Request(message) => MessageError::Request(message),
        }
    }
}

/// Messages sent from background tasks to the UI loop.
///
/// Every message carries the id of the request that produced it so results
/// from superseded requests can be dropped.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A frame decoded from the chat stream
    ChatFrame { request_id: Uuid, frame: Frame },
    /// The chat stream ended (or failed to start)
    ChatFinished {
        request_id: Uuid,
        result: Result<DecodeSummary, ChatFailure>,
    },
    /// One file of an upload batch finished
    UploadFinished {
        batch_id: Uuid,
        index: usize,
        result: Result<String, String>,
    },
    /// Ingestion finished with the server's message or an error
    IngestFinished {
        request_id: Uuid,
        result: Result<String, String>,
    },
    /// Status request finished
    StatusLoaded {
        request_id: Uuid,
        result: Result<StatusResponse, String>,
    },
}

impl AppMessage {
    /// Id of the request this message belongs to.
    pub fn request_id(&self) -> Uuid {
        match self {
            AppMessage::ChatFrame { request_id, .. }
            | AppMessage::ChatFinished { request_id, .. }
            | AppMessage::IngestFinished { request_id, .. }
            | AppMessage::StatusLoaded { request_id, .. } => *request_id,
            AppMessage::UploadFinished { batch_id, .. } => *batch_id,
        }
    }
}
