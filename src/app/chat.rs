//! Chat submission and cancellation.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{chat_failure, ActiveChat, App, AppMessage};
use crate::models::ChatRequest;
use crate::sse::{DecodeError, Frame};
use crate::state::NotificationLevel;
use crate::traits::FrameSink;

/// Frame sink that forwards frames to the UI loop.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    request_id: Uuid,
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl ChannelSink {
    pub fn new(request_id: Uuid, tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self { request_id, tx }
    }
}

impl FrameSink for ChannelSink {
    fn on_frame(&mut self, frame: Frame) {
        let _ = self.tx.send(AppMessage::ChatFrame {
            request_id: self.request_id,
            frame,
        });
    }

    fn on_decode_error(&mut self, error: &DecodeError) {
        warn!(request_id = %self.request_id, "Skipping malformed frame: {}", error);
    }
}

impl App {
    /// Start streaming an answer to `text`.
    pub(crate) fn submit_chat(&mut self, text: String) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }
        if self.session.is_streaming() {
            self.session.notify(
                NotificationLevel::Warning,
                "Wait for the current answer to finish",
            );
            return;
        }

        let request = ChatRequest::new(message, self.session.use_web);
        self.session.push_user_message(message);
        self.session.begin_assistant_message();
        self.input.clear();
        self.scroll = 0;

        let request_id = Uuid::new_v4();
        let client = self.client.clone();
        let options = self.decode_options;
        let tx = self.message_tx.clone();
        info!(%request_id, use_web = request.use_web, "Starting chat request");

        let handle = tokio::spawn(async move {
            let mut sink = ChannelSink::new(request_id, tx.clone());
            let result = client
                .chat(&request, &mut sink, options)
                .await
                .map_err(|e| {
                    warn!(%request_id, code = e.error_code(), "Chat failed: {}", e);
                    chat_failure(&e)
                });
            let _ = tx.send(AppMessage::ChatFinished { request_id, result });
        });

        self.active_chat = Some(ActiveChat { request_id, handle });
    }

    /// Stop the in-flight chat request, keeping what has arrived.
    pub(crate) fn cancel_chat(&mut self) {
        let Some(active) = self.active_chat.take() else {
            return;
        };
        active.handle.abort();
        self.session.cancel_assistant_message();
        self.session
            .notify(NotificationLevel::Info, "Response cancelled");
        debug!(request_id = %active.request_id, "Chat request cancelled");
    }

    /// Whether `request_id` belongs to the chat currently streaming.
    pub(crate) fn is_active_chat(&self, request_id: Uuid) -> bool {
        self.active_chat
            .as_ref()
            .is_some_and(|active| active.request_id == request_id)
    }

    pub(crate) fn finish_chat(&mut self) {
        self.active_chat = None;
        self.session.finish_assistant_message();
    }
}
