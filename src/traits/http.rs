//! HTTP transport seam.
//!
//! The client only needs four request shapes: plain GET and POST, a POST
//! whose body is streamed back, and a single-file multipart upload.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// Request or response headers.
pub type Headers = HashMap<String, String>;

/// Streaming response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// One file part of a multipart form upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    /// File name sent in the part's Content-Disposition
    pub file_name: String,
    /// MIME type of the part
    pub content_type: String,
    /// File contents
    pub bytes: Bytes,
}

impl MultipartFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Header names are lowercase when produced by the reqwest adapter
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self::with_headers(status, Headers::new(), body)
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Body as text with invalid UTF-8 replaced, for error messages.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure reported by an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Non-2xx status; `message` is the raw response body
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// Body read failed after the response started
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Transport used by [`crate::client::SaturdayClient`].
///
/// Implemented by [`crate::adapters::ReqwestHttpClient`] for real servers and
/// [`crate::adapters::MockHttpClient`] in tests.
///
/// ```ignore
/// use saturday::traits::{HttpClient, Headers, HttpError};
///
/// async fn fetch_status<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.get("http://127.0.0.1:8081/api/status", &Headers::new()).await?;
///     Ok(response.text_lossy())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST `body` as-is. Callers set `Content-Type` themselves.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST and hand back the body as it arrives.
    ///
    /// A non-2xx status is returned as [`HttpError::ServerError`] before any
    /// body is streamed.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;

    /// multipart/form-data POST with a single file part named `field`.
    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: MultipartFile,
        headers: &Headers,
    ) -> Result<Response, HttpError>;
}
