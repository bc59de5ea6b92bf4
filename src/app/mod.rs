//! Application state and logic.
//!
//! [`App`] owns the [`Session`] and is driven from a single UI loop. User
//! intents arrive as [`crate::events::UiEvent`]s; long-running requests run
//! as tokio tasks that report back through the [`AppMessage`] channel.

mod chat;
mod files;
mod handlers;
mod ingest;
mod keys;
mod messages;
mod status;
mod types;

pub use chat::ChannelSink;
pub use keys::{Command, KeyCombo, Keymap};
pub use messages::{AppMessage, ChatFailure};
pub use types::{ActiveChat, InputLine, InputMode};

use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::client::SaturdayClient;
use crate::config::Config;
use crate::error::{NetworkError, SaturdayError, StreamError};
use crate::sse::DecodeOptions;
use crate::state::Session;
use crate::traits::HttpClient;

/// Client type the app talks through.
pub type AppClient = SaturdayClient<dyn HttpClient>;

/// Main application state
pub struct App {
    pub session: Session,
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Set when visible state changed since the last draw
    pub needs_redraw: bool,
    pub input: InputLine,
    pub mode: InputMode,
    /// Transcript lines scrolled up from the bottom
    pub scroll: u16,
    /// Tick counter for the streaming cursor
    pub tick_count: u64,
    /// Sender handed to background tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver taken by the UI loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    keymap: Keymap,
    client: AppClient,
    decode_options: DecodeOptions,
    status_poll_interval: Duration,
    active_chat: Option<ActiveChat>,
    upload_batch: Option<Uuid>,
    ingest_request: Option<Uuid>,
    status_request: Option<Uuid>,
}

impl App {
    /// Create a new App talking to the server through `client`.
    pub fn new(client: AppClient, config: &Config) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new().with_use_web(config.use_web_default),
            should_quit: false,
            needs_redraw: true,
            input: InputLine::new(),
            mode: InputMode::default(),
            scroll: 0,
            tick_count: 0,
            message_tx,
            message_rx: Some(message_rx),
            keymap: Keymap::new(),
            client,
            decode_options: config.decode_options(),
            status_poll_interval: config.status_poll_interval(),
            active_chat: None,
            upload_batch: None,
            ingest_request: None,
            status_request: None,
        }
    }

    pub fn client(&self) -> &AppClient {
        &self.client
    }

    pub fn decode_options(&self) -> DecodeOptions {
        self.decode_options
    }

    pub fn status_poll_interval(&self) -> Duration {
        self.status_poll_interval
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Whether a chat answer is currently streaming.
    pub fn is_streaming(&self) -> bool {
        self.session.is_streaming()
    }

    pub fn quit(&mut self) {
        if let Some(active) = self.active_chat.take() {
            active.handle.abort();
        }
        self.should_quit = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
        self.mark_dirty();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.mark_dirty();
    }
}

/// Text shown to the user for a failed request.
///
/// Transport failures report the underlying message so callers can prefix
/// it themselves.
pub(crate) fn describe_error(err: &SaturdayError) -> String {
    match err.inner() {
        SaturdayError::Stream(StreamError::ConnectionLost { message })
        | SaturdayError::Network(NetworkError::ConnectionFailed { message, .. }) => {
            message.clone()
        }
        other => other.user_message(),
    }
}

/// Classify a failed chat request.
///
/// Transport failures (unreachable server, timeouts, a broken stream) are
/// connection errors; everything else happened after the server answered.
pub(crate) fn chat_failure(err: &SaturdayError) -> ChatFailure {
    let message = describe_error(err);
    match err.inner() {
        SaturdayError::Network(
            NetworkError::ConnectionFailed { .. }
            | NetworkError::Timeout { .. }
            | NetworkError::Other { .. },
        )
        | SaturdayError::Stream(StreamError::ConnectionLost { .. } | StreamError::Timeout { .. }) => {
            ChatFailure::Connection(message)
        }
        _ => ChatFailure::Request(message),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::adapters::MockHttpClient;

    pub const BASE: &str = "http://saturday.test";

    pub fn app_with(mock: &MockHttpClient) -> App {
        let http: Arc<dyn HttpClient> = Arc::new(mock.clone());
        App::new(SaturdayClient::new(BASE, http), &Config::default())
    }

    /// Apply channel messages until `done` holds or a second passes.
    pub async fn pump_until<F>(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMessage>, done: F)
    where
        F: Fn(&App) -> bool,
    {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while !done(app) {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(msg)) => app.handle_message(msg),
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorContext;
    use crate::state::MessageError;

    #[test]
    fn test_describe_error_unwraps_transport_message() {
        let err = SaturdayError::from(StreamError::ConnectionLost {
            message: "reset by peer".to_string(),
        })
        .with_context(ErrorContext::new("chat"));
        assert_eq!(describe_error(&err), "reset by peer");

        let err = SaturdayError::Rejected {
            operation: "upload".to_string(),
            message: "Unsupported file type".to_string(),
        };
        assert_eq!(describe_error(&err), "Unsupported file type");
    }

    #[test]
    fn test_chat_failure_separates_transport_from_request() {
        let lost = SaturdayError::from(StreamError::ConnectionLost {
            message: "reset by peer".to_string(),
        })
        .with_context(ErrorContext::new("chat"));
        assert_eq!(
            chat_failure(&lost),
            ChatFailure::Connection("reset by peer".to_string())
        );

        let idle = SaturdayError::from(StreamError::Timeout {
            idle: Duration::from_secs(120),
        });
        assert!(matches!(chat_failure(&idle), ChatFailure::Connection(_)));

        let status = SaturdayError::from(NetworkError::HttpStatus {
            status: 500,
            message: "Index not built".to_string(),
        });
        assert_eq!(
            chat_failure(&status),
            ChatFailure::Request("Index not built".to_string())
        );

        let frame = SaturdayError::from(StreamError::InvalidFrame {
            message: "bad json".to_string(),
        });
        assert!(matches!(chat_failure(&frame), ChatFailure::Request(_)));
        assert_eq!(
            MessageError::from(chat_failure(&frame)).to_string(),
            format!("Request failed: {}", chat_failure(&frame).message())
        );
    }

    #[tokio::test]
    async fn test_new_app_defaults() {
        let mock = crate::adapters::MockHttpClient::new();
        let app = test_support::app_with(&mock);
        assert!(app.needs_redraw);
        assert!(!app.is_streaming());
        assert!(!app.session.use_web);
        assert_eq!(app.mode, InputMode::Chat);
        assert_eq!(app.status_poll_interval(), Duration::from_secs(30));
    }
}
