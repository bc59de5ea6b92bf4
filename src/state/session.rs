//! Session state management
//!
//! `Session` owns every piece of mutable UI state: the web-search flag, the
//! current upload selection, the chat transcript, ingestion and server
//! status, and recent notifications. Only the app's UI loop mutates it.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::transcript::{ChatMessage, MessageError};
use super::uploads::{IngestState, ServerStatusView, UploadEntry, UploadStatus};

/// Maximum notifications kept.
pub const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Web search flag sent with the next chat request
    pub use_web: bool,
    pub uploads: Vec<UploadEntry>,
    pub transcript: Vec<ChatMessage>,
    pub ingest: IngestState,
    pub server: ServerStatusView,
    pub notifications: VecDeque<Notification>,
    /// Index of the assistant message currently receiving frames
    active_assistant: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_use_web(mut self, use_web: bool) -> Self {
        self.use_web = use_web;
        self
    }

    pub fn set_use_web(&mut self, use_web: bool) {
        self.use_web = use_web;
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Replace the upload list with a fresh selection.
    pub fn begin_uploads(&mut self, paths: Vec<PathBuf>) {
        self.uploads = paths.into_iter().map(UploadEntry::new).collect();
    }

    /// Update one entry. Out-of-range indexes are ignored.
    pub fn mark_upload(&mut self, index: usize, status: UploadStatus) {
        if let Some(entry) = self.uploads.get_mut(index) {
            entry.status = status;
        }
    }

    /// Names of files that finished uploading.
    pub fn uploaded_names(&self) -> Vec<&str> {
        self.uploads
            .iter()
            .filter(|e| e.status == UploadStatus::Uploaded)
            .map(|e| e.name.as_str())
            .collect()
    }

    pub fn uploads_in_progress(&self) -> bool {
        self.uploads
            .iter()
            .any(|e| e.status == UploadStatus::Uploading)
    }

    // ========================================================================
    // Transcript
    // ========================================================================

    pub fn push_user_message(&mut self, text: impl Into<String>) {
        self.transcript.push(ChatMessage::user(text));
    }

    /// Append an empty streaming assistant message and make it the target of
    /// subsequent frame updates.
    pub fn begin_assistant_message(&mut self) -> usize {
        self.transcript.push(ChatMessage::assistant_placeholder());
        let index = self.transcript.len() - 1;
        self.active_assistant = Some(index);
        index
    }

    /// Whether an assistant message is still streaming.
    pub fn is_streaming(&self) -> bool {
        self.active_assistant.is_some()
    }

    fn active_mut(&mut self) -> Option<&mut ChatMessage> {
        self.active_assistant
            .and_then(|index| self.transcript.get_mut(index))
    }

    pub fn append_chunk(&mut self, content: &str) {
        if let Some(msg) = self.active_mut() {
            if msg.error.is_none() {
                msg.text.push_str(content);
            }
        }
    }

    /// Attach sources. Only the first non-empty list is kept.
    pub fn set_sources(&mut self, sources: Vec<String>) {
        if let Some(msg) = self.active_mut() {
            if msg.sources.is_empty() {
                msg.sources = sources;
            }
        }
    }

    /// Replace the streamed text with an error.
    pub fn set_error(&mut self, error: MessageError) {
        if let Some(msg) = self.active_mut() {
            msg.text.clear();
            msg.error = Some(error);
        }
    }

    /// Stop streaming the active message, keeping what it has.
    pub fn finish_assistant_message(&mut self) {
        if let Some(msg) = self.active_mut() {
            msg.streaming = false;
        }
        self.active_assistant = None;
    }

    /// Finish the active message as cancelled by the user.
    pub fn cancel_assistant_message(&mut self) {
        if let Some(msg) = self.active_mut() {
            msg.cancelled = true;
        }
        self.finish_assistant_message();
    }

    pub fn active_message(&self) -> Option<&ChatMessage> {
        self.active_assistant.and_then(|i| self.transcript.get(i))
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) {
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification {
            level,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }
}
