//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::{sse_line, TestAppBuilder};
//!
//! let (app, mock) = TestAppBuilder::new()
//!     .with_chat_chunks(&[sse_line(r#"{"type":"chunk","content":"hi"}"#)])
//!     .build();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use saturday::app::{App, AppMessage};
use saturday::client::SaturdayClient;
use saturday::config::Config;
use saturday::traits::HttpClient;
use tokio::sync::mpsc;

/// Base URL every mock-backed test uses.
pub const TEST_BASE: &str = "http://saturday.test";

pub fn url(path: &str) -> String {
    format!("{}{}", TEST_BASE, path)
}

/// One `data: ` line with its newline.
pub fn sse_line(json: &str) -> String {
    format!("data: {}\n", json)
}

/// A typical answer: two chunks, sources, done.
pub fn sample_answer_body() -> String {
    [
        sse_line(r#"{"type":"chunk","content":"The café "}"#),
        "\n".to_string(),
        sse_line(r#"{"type":"chunk","content":"opens at 8 — ☕"}"#),
        sse_line(r#"{"type":"sources","sources":["hours.md","menu.pdf"]}"#),
        sse_line(r#"{"type":"done"}"#),
    ]
    .concat()
}

/// Builder for App instances backed by a [`MockHttpClient`].
pub struct TestAppBuilder {
    config: Config,
    mock: MockHttpConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default().with_server_url(TEST_BASE),
            mock: MockHttpConfig::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config.with_server_url(TEST_BASE);
        self
    }

    /// Stream these chunks from the chat endpoint.
    pub fn with_chat_chunks<S: AsRef<str>>(mut self, chunks: &[S]) -> Self {
        self.mock = self.mock.with_sse(&url("/api/chat"), chunks);
        self
    }

    pub fn with_response(mut self, path: &str, response: MockResponse) -> Self {
        self.mock = self.mock.with_response(&url(path), response);
        self
    }

    pub fn with_json(mut self, path: &str, status: u16, json: &str) -> Self {
        self.mock = self.mock.with_json_response(&url(path), status, json);
        self
    }

    pub fn build(self) -> (App, MockHttpClient) {
        let mock = self.mock.build();
        let http: Arc<dyn HttpClient> = Arc::new(mock.clone());
        let client = SaturdayClient::new(self.config.server_url.clone(), http);
        (App::new(client, &self.config), mock)
    }
}

/// Apply channel messages until `done` holds or the deadline passes.
pub async fn pump_until<F>(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMessage>, done: F) -> bool
where
    F: Fn(&App) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !done(app) {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(msg)) => app.handle_message(msg),
            _ => return false,
        }
    }
    true
}
