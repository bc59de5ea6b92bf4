//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses, byte streams, or errors, and records every request it sees.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, MultipartFile, Response};

/// A recorded multipart file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPart {
    /// Form field name
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
    /// File part (for multipart requests)
    pub part: Option<RecordedPart>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
    /// Return a stream of bytes
    Stream(Vec<Bytes>),
    /// Return a stream error
    StreamError(HttpError),
    /// Yield the chunks, then fail the read with the error
    StreamThenError(Vec<Bytes>, HttpError),
    /// Yield the chunks, then never yield again
    StreamThenPending(Vec<Bytes>),
}

impl MockResponse {
    /// Successful response with a JSON body.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(value.to_string())))
    }

    /// Stream whose chunks are the given strings.
    pub fn sse<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|c| Bytes::from(c.into()))
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by exact URL, then by URL prefix, then the
/// default response.
///
/// ```ignore
/// use saturday::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost/api/status",
///     MockResponse::json(200, serde_json::json!({"status": "online", "files_count": 2})),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Recorded requests whose URL ends with `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.url.ends_with(path))
            .cloned()
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Clear all configured responses.
    pub fn clear_responses(&self) {
        lock(&self.responses).clear();
    }

    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        part: Option<RecordedPart>,
    ) {
        lock(&self.requests).push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            part,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = lock(&self.responses);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest prefix wins so overlapping patterns are deterministic
        if let Some((_, response)) = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
        {
            return Some(response.clone());
        }

        lock(&self.default_response).clone()
    }

    fn respond(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) | Some(MockResponse::StreamError(err)) => Err(err),
            Some(_) => Err(HttpError::Other(
                "Stream response on non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, None);
        self.respond(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.respond(url)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok::<Bytes, HttpError>)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::StreamThenPending(chunks)) => {
                let stream = futures::stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>))
                    .chain(futures::stream::pending());
                Ok(Box::pin(stream))
            }
            Some(MockResponse::StreamError(err)) | Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Success(response)) if !response.is_success() => {
                Err(HttpError::ServerError {
                    status: response.status,
                    message: response.text().unwrap_or_default(),
                })
            }
            Some(MockResponse::Success(_)) => Err(HttpError::Other(
                "Non-stream response on stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: MultipartFile,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let part = RecordedPart {
            field: field.to_string(),
            file_name: file.file_name,
            content_type: file.content_type,
            bytes: file.bytes,
        };
        self.record_request("POST", url, headers, None, Some(part));
        self.respond(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/test",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client
            .get("https://example.com/test", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "https://example.com/test");
    }

    #[tokio::test]
    async fn test_get_with_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/error",
            MockResponse::Error(HttpError::ServerError {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        );

        match client.get("https://example.com/error", &Headers::new()).await {
            Err(HttpError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_records_body() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/api",
            MockResponse::json(200, serde_json::json!({"status": "success"})),
        );

        client
            .post("https://example.com/api", r#"{"name": "test"}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body, Some(r#"{"name": "test"}"#.to_string()));
        assert!(requests[0].part.is_none());
    }

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/stream",
            MockResponse::sse(["chunk1", "chunk2", "chunk3"]),
        );

        let mut stream = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await
            .unwrap();

        let mut chunks = Vec::new();
        while let Some(result) = stream.next().await {
            chunks.push(result.unwrap());
        }
        assert_eq!(
            chunks,
            vec![
                Bytes::from("chunk1"),
                Bytes::from("chunk2"),
                Bytes::from("chunk3")
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_then_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/stream",
            MockResponse::StreamThenError(
                vec![Bytes::from("a")],
                HttpError::Io("reset".to_string()),
            ),
        );

        let mut stream = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from("a"));
        assert!(matches!(stream.next().await, Some(Err(HttpError::Io(_)))));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_post_stream_error_status() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/stream",
            MockResponse::Success(Response::new(500, Bytes::from("boom"))),
        );

        let result = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await;
        assert!(matches!(
            result,
            Err(HttpError::ServerError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_multipart_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(
            200,
            serde_json::json!({"status": "success"}),
        ));

        client
            .post_multipart(
                "https://example.com/upload",
                "file",
                MultipartFile::new("a.txt", "text/plain", "hello".as_bytes().to_vec()),
                &Headers::new(),
            )
            .await
            .unwrap();

        let part = client.get_requests()[0].part.clone().unwrap();
        assert_eq!(part.field, "file");
        assert_eq!(part.file_name, "a.txt");
        assert_eq!(part.content_type, "text/plain");
        assert_eq!(part.bytes, Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client
            .get("https://example.com/missing", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_prefix_match_prefers_longest() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/api",
            MockResponse::Success(Response::new(200, Bytes::from("short"))),
        );
        client.set_response(
            "https://example.com/api/v1",
            MockResponse::Success(Response::new(200, Bytes::from("long"))),
        );

        let response = client
            .get("https://example.com/api/v1/users", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.body, Bytes::from("long"));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let cloned = client.clone();
        cloned
            .get("https://example.com", &Headers::new())
            .await
            .unwrap();

        assert_eq!(client.get_requests().len(), 1);
        assert_eq!(client.requests_to(".com").len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }

    #[test]
    fn test_clear_responses() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com",
            MockResponse::Success(Response::new(200, Bytes::new())),
        );
        client.clear_responses();
        assert!(client.get_response("https://example.com").is_none());
    }
}
