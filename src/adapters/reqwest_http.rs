//! Reqwest-based HTTP client adapter.
//!
//! Production implementation of the [`HttpClient`] trait.

use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, MultipartFile, Response};

/// HTTP client implementation using reqwest.
///
/// Holds two clients: round-trip requests use one with a whole-request
/// timeout, while the chat stream uses one limited only by the connect
/// timeout so long answers are not cut off.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    stream_client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        let client = reqwest::Client::new();
        Self {
            stream_client: client.clone(),
            client,
        }
    }

    /// Build clients with the given connect and request timeouts.
    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()?;
        let stream_client = reqwest::Client::builder()
            .connect_timeout(connect)
            .build()?;
        Ok(Self {
            client,
            stream_client,
        })
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client used
    /// for every request.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            stream_client: client.clone(),
            client,
        }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        headers
            .iter()
            .fold(builder, |builder, (key, value)| builder.header(key, value))
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<Response, HttpError> {
        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        Self::send(Self::apply_headers(self.client.get(url), headers)).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        let builder = self.client.post(url).body(body.to_string());
        Self::send(Self::apply_headers(builder, headers)).await
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let builder = self.stream_client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder.send().await.map_err(Self::convert_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HttpError::ServerError { status, message });
        }

        let stream = response.bytes_stream().map(|result| {
            result.map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout(e.to_string())
                } else {
                    HttpError::Io(e.to_string())
                }
            })
        });

        Ok(Box::pin(stream))
    }

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: MultipartFile,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(Self::convert_error)?;
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let builder = self.client.post(url).multipart(form);
        Self::send(Self::apply_headers(builder, headers)).await
    }
}
