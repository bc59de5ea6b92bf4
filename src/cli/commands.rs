//! One-shot command implementations.
//!
//! Each command writes its human-readable output to the given writer and
//! reports whether it succeeded, so the binary can pick an exit code.

use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::client::SaturdayClient;
use crate::error::{classify_io_error, SaturdayError, SaturdayResult};
use crate::models::ChatRequest;
use crate::sse::{DecodeError, DecodeOptions, Frame};
use crate::traits::{FrameSink, HttpClient};

/// Sink that prints chunks as they arrive.
struct PrintSink<'a, W: Write> {
    out: &'a mut W,
    sources: Vec<String>,
    server_error: Option<String>,
    write_error: Option<std::io::Error>,
}

impl<W: Write> PrintSink<'_, W> {
    fn write(&mut self, text: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            self.write_error = Some(e);
        }
    }
}

impl<W: Write> FrameSink for PrintSink<'_, W> {
    fn on_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Chunk { content } => self.write(&content),
            Frame::Sources { sources } => {
                if self.sources.is_empty() {
                    self.sources = sources;
                }
            }
            Frame::Error { message } => {
                if self.server_error.is_none() {
                    self.server_error = Some(message);
                }
            }
            Frame::Done => {}
        }
    }

    fn on_decode_error(&mut self, error: &DecodeError) {
        warn!("Skipping malformed frame: {}", error);
    }
}

/// Result of `ask`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskOutcome {
    pub sources: Vec<String>,
    /// Message of an error frame, if the server sent one
    pub server_error: Option<String>,
}

impl AskOutcome {
    pub fn is_success(&self) -> bool {
        self.server_error.is_none()
    }
}

/// Stream the answer to `message` into `out`, then the sources line.
pub async fn ask<C, W>(
    client: &SaturdayClient<C>,
    message: &str,
    use_web: bool,
    options: DecodeOptions,
    out: &mut W,
) -> SaturdayResult<AskOutcome>
where
    C: HttpClient + ?Sized,
    W: Write,
{
    let request = ChatRequest::new(message.trim(), use_web);
    let mut sink = PrintSink {
        out,
        sources: Vec::new(),
        server_error: None,
        write_error: None,
    };

    client.chat(&request, &mut sink, options).await?;

    let PrintSink {
        out,
        sources,
        server_error,
        write_error,
    } = sink;
    if let Some(e) = write_error {
        return Err(classify_io_error(e, None, "write").into());
    }

    let mut tail = String::from("\n");
    if let Some(error) = &server_error {
        tail.push_str(&format!("Error: {}\n", error));
    }
    if !sources.is_empty() {
        tail.push_str(&format!("Sources: {}\n", sources.join(", ")));
    }
    out.write_all(tail.as_bytes())?;

    Ok(AskOutcome {
        sources,
        server_error,
    })
}

/// Upload each file, printing one line per file. Returns the failure count.
pub async fn upload<C, W>(
    client: &SaturdayClient<C>,
    paths: &[PathBuf],
    out: &mut W,
) -> SaturdayResult<usize>
where
    C: HttpClient + ?Sized,
    W: Write,
{
    let mut failed = 0;
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match client.upload(path).await {
            Ok(response) => {
                let detail = response
                    .message
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default();
                writeln!(out, "✓ Uploaded {}{}", name, detail)?;
            }
            Err(e) => {
                failed += 1;
                warn!(code = e.error_code(), "Upload of {} failed: {}", name, e);
                writeln!(out, "✗ {}: {}", name, upload_failure(&e))?;
            }
        }
    }
    Ok(failed)
}

fn upload_failure(err: &SaturdayError) -> String {
    err.inner().user_message()
}

/// Trigger ingestion and print the server's message.
pub async fn ingest<C, W>(client: &SaturdayClient<C>, out: &mut W) -> SaturdayResult<()>
where
    C: HttpClient + ?Sized,
    W: Write,
{
    let response = client.ingest().await?;
    let message = response
        .message
        .unwrap_or_else(|| "Ingestion complete".to_string());
    writeln!(out, "{}", message)?;
    Ok(())
}

/// Print server status. Returns whether the server is online.
pub async fn status<C, W>(client: &SaturdayClient<C>, json: bool, out: &mut W) -> SaturdayResult<bool>
where
    C: HttpClient + ?Sized,
    W: Write,
{
    let status = client.status().await?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
        return Ok(status.is_online());
    }

    let label = if status.is_online() { "Online" } else { "Offline" };
    writeln!(out, "Server:  {} ({})", label, client.base_url())?;
    writeln!(out, "Files:   {}", status.files_count)?;
    for file in &status.files {
        writeln!(out, "  - {}", file)?;
    }
    if let Some(message) = &status.message {
        writeln!(out, "Message: {}", message)?;
    }
    Ok(status.is_online())
}
