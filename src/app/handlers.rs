//! Message and event handling for the App.

use std::path::PathBuf;

use tracing::{debug, info};

use super::{App, AppMessage};
use crate::events::EventHandler;
use crate::sse::Frame;
use crate::state::{MessageError, NotificationLevel};

impl App {
    /// Handle an incoming async message
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::ChatFrame { request_id, frame } => {
                if !self.is_active_chat(request_id) {
                    debug!(%request_id, "Dropping frame from stale chat request");
                    return;
                }
                self.apply_frame(frame);
            }
            AppMessage::ChatFinished { request_id, result } => {
                if !self.is_active_chat(request_id) {
                    return;
                }
                match result {
                    Ok(summary) => {
                        debug!(
                            %request_id,
                            frames = summary.frames,
                            bytes = summary.bytes,
                            "Chat stream finished"
                        );
                        if summary.decode_errors > 0 {
                            self.session.notify(
                                NotificationLevel::Warning,
                                format!("Skipped {} malformed frame(s)", summary.decode_errors),
                            );
                        }
                    }
                    Err(failure) => {
                        self.session
                            .notify(NotificationLevel::Error, failure.notification());
                        self.session.set_error(MessageError::from(failure));
                    }
                }
                self.finish_chat();
            }
            AppMessage::UploadFinished {
                batch_id,
                index,
                result,
            } => self.finish_upload(batch_id, index, result),
            AppMessage::IngestFinished { request_id, result } => {
                self.finish_ingest(request_id, result)
            }
            AppMessage::StatusLoaded { request_id, result } => {
                self.apply_status(request_id, result)
            }
        }
    }

    fn apply_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Chunk { content } => self.session.append_chunk(&content),
            Frame::Sources { sources } => self.session.set_sources(sources),
            Frame::Error { message } => {
                self.session.set_error(MessageError::Server(message));
            }
            Frame::Done => {}
        }
    }
}

impl EventHandler for App {
    fn on_submit(&mut self, text: String) {
        self.submit_chat(text);
    }

    fn on_toggle_web_search(&mut self, enabled: bool) {
        self.session.set_use_web(enabled);
        let text = if enabled {
            "Web Search Enabled"
        } else {
            "Web Search Disabled"
        };
        info!("{}", text);
        self.session.notify(NotificationLevel::Info, text);
    }

    fn on_files_dropped(&mut self, paths: Vec<PathBuf>) {
        self.start_uploads(paths);
    }

    fn on_ingest(&mut self) {
        self.start_ingest();
    }

    fn on_refresh_status(&mut self) {
        self.refresh_status();
    }

    fn on_cancel_stream(&mut self) {
        self.cancel_chat();
    }
}
