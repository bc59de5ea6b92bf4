//! Application state.

mod session;
mod transcript;
mod uploads;

pub use session::{Notification, NotificationLevel, Session, MAX_NOTIFICATIONS};
pub use transcript::{Author, ChatMessage, MessageError};
pub use uploads::{IngestState, ServerStatusView, UploadEntry, UploadStatus};
