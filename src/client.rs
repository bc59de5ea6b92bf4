//! Saturday API client.
//!
//! Typed wrappers for the four server endpoints. The chat endpoint streams
//! its answer through the [`crate::sse`] decoder; the others are single
//! round trips returning JSON.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::config::Config;
use crate::error::{
    classify_io_error, ErrorContext, NetworkError, ResultExt, SaturdayError, SaturdayResult,
};
use crate::models::{ActionResponse, ChatRequest, ErrorDetail, StatusResponse};
use crate::sse::{decode_stream, DecodeOptions, DecodeSummary};
use crate::traits::{FrameSink, Headers, HttpClient, HttpError, MultipartFile, Response};

/// Default server address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8081";

pub const CHAT_PATH: &str = "/api/chat";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const INGEST_PATH: &str = "/api/ingest";
pub const STATUS_PATH: &str = "/api/status";

/// Multipart field name the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";

const UPLOAD_FALLBACK: &str = "Upload failed";
const INGEST_FALLBACK: &str = "Ingestion failed";

/// Guess a MIME type from a file extension.
pub fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("txt") => "text/plain",
        Some("md") | Some("markdown") => "text/markdown",
        Some("pdf") => "application/pdf",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Build the reqwest transport with the configured timeouts.
///
/// Client construction failures are classified like request failures.
pub fn http_from_config(config: &Config) -> SaturdayResult<ReqwestHttpClient> {
    let http = ReqwestHttpClient::with_timeouts(config.connect_timeout(), config.request_timeout())?;
    Ok(http)
}

/// Client for the Saturday server.
///
/// Generic over the transport so tests can substitute
/// [`crate::adapters::MockHttpClient`].
pub struct SaturdayClient<C: HttpClient + ?Sized> {
    base_url: String,
    http: Arc<C>,
}

impl<C: HttpClient + ?Sized> Clone for SaturdayClient<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: Arc::clone(&self.http),
        }
    }
}

impl<C: HttpClient + ?Sized> std::fmt::Debug for SaturdayClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaturdayClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl<C: HttpClient + ?Sized> SaturdayClient<C> {
    /// Create a client for `base_url`. A trailing `/` is trimmed.
    pub fn new(base_url: impl Into<String>, http: Arc<C>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a chat message and stream the answer into `sink`.
    ///
    /// Error frames from the server are delivered to the sink like any
    /// other frame; only transport failures and strict-mode decode
    /// failures are returned as errors.
    pub async fn chat<K>(
        &self,
        request: &ChatRequest,
        sink: &mut K,
        options: DecodeOptions,
    ) -> SaturdayResult<DecodeSummary>
    where
        K: FrameSink + ?Sized,
    {
        let url = self.url(CHAT_PATH);
        let body = serde_json::to_string(request)?;

        let mut headers: Headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        info!(
            "Sending chat message ({} chars, use_web={})",
            request.message.chars().count(),
            request.use_web
        );

        let stream = self
            .http
            .post_stream(&url, &body, &headers)
            .await
            .map_err(|e| self.transport_error(e, &url))
            .context(ErrorContext::new("chat").with_component("client"))?;

        let summary = decode_stream(stream, sink, options).await?;
        Ok(summary)
    }

    /// Upload one file as multipart field `file`.
    pub async fn upload(&self, path: &Path) -> SaturdayResult<ActionResponse> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let ctx = || ErrorContext::new("upload").with_file(file_name.clone());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| classify_io_error(e, Some(path.to_path_buf()), "read"))
            .with_context(ctx)?;

        info!("Uploading {} ({} bytes)", file_name, bytes.len());

        let url = self.url(UPLOAD_PATH);
        let part = MultipartFile::new(file_name.clone(), guess_content_type(path), bytes);
        let response = self
            .http
            .post_multipart(&url, UPLOAD_FIELD, part, &Headers::new())
            .await
            .map_err(|e| self.transport_error(e, &url))
            .with_context(ctx)?;

        Self::action_result("upload", response, UPLOAD_FALLBACK).with_context(ctx)
    }

    /// Ask the server to rebuild its document index.
    pub async fn ingest(&self) -> SaturdayResult<ActionResponse> {
        info!("Triggering ingestion");
        let url = self.url(INGEST_PATH);
        let response = self
            .http
            .post(&url, "", &Headers::new())
            .await
            .map_err(|e| self.transport_error(e, &url))?;

        Self::action_result("ingest", response, INGEST_FALLBACK)
    }

    /// Fetch server status and indexed file count.
    pub async fn status(&self) -> SaturdayResult<StatusResponse> {
        let url = self.url(STATUS_PATH);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| self.transport_error(e, &url))?;

        if !response.is_success() {
            return Err(Self::status_error(&response).into());
        }

        let status: StatusResponse = response.json()?;
        debug!(
            "Server status: {} ({} files)",
            status.status, status.files_count
        );
        Ok(status)
    }

    fn transport_error(&self, err: HttpError, url: &str) -> SaturdayError {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            }
            .into(),
            HttpError::ServerError { status, message } => {
                let message = ErrorDetail::message_from(&message).unwrap_or(message);
                NetworkError::HttpStatus { status, message }.into()
            }
            other => other.into(),
        }
    }

    fn status_error(response: &Response) -> NetworkError {
        let body = response.text_lossy();
        NetworkError::HttpStatus {
            status: response.status,
            message: ErrorDetail::message_from(&body).unwrap_or(body),
        }
    }

    fn action_result(
        operation: &str,
        response: Response,
        fallback: &str,
    ) -> SaturdayResult<ActionResponse> {
        if !response.is_success() {
            let body = response.text_lossy();
            return match ErrorDetail::message_from(&body) {
                Some(detail) => Err(SaturdayError::Rejected {
                    operation: operation.to_string(),
                    message: detail,
                }),
                None => Err(Self::status_error(&response).into()),
            };
        }

        let action: ActionResponse = response.json()?;
        if !action.is_success() {
            return Err(SaturdayError::Rejected {
                operation: operation.to_string(),
                message: action
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            });
        }
        Ok(action)
    }
}
