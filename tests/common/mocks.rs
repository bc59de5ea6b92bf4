//! Mock configurations for test fixtures.
//!
//! Re-exports the mocks from `saturday::adapters::mock` and adds a small
//! builder for setting up responses.

pub use saturday::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use saturday::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
#[derive(Default)]
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures a JSON response.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Configures any mock response.
    pub fn with_response(self, url: &str, response: MockResponse) -> Self {
        self.client.set_response(url, response);
        self
    }

    /// Configures a transport error.
    pub fn with_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Configures a streamed body delivered in the given chunks.
    pub fn with_sse<S: AsRef<str>>(self, url: &str, chunks: &[S]) -> Self {
        self.client.set_response(
            url,
            MockResponse::sse(chunks.iter().map(|c| c.as_ref().to_string())),
        );
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}
