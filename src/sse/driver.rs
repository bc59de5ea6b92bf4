//! Async driver that pumps a response body through a [`FrameDecoder`].

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::{debug, warn};

use super::decoder::{DecodeOptions, FrameDecoder};
use super::frame::{DecodeError, Frame};
use crate::error::StreamError;
use crate::traits::{FrameSink, HttpError};

/// Outcome of a stream that ended without a transport failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Frames delivered to the sink
    pub frames: usize,
    /// Malformed lines reported to the sink and skipped
    pub decode_errors: usize,
    /// Raw body bytes read
    pub bytes: usize,
    /// Bytes of an unterminated last line that were discarded
    pub dropped_trailing_bytes: usize,
    /// A `done` frame was seen
    pub completed: bool,
}

/// Decode `stream` to the end, delivering frames to `sink` in order.
///
/// A read failure stops the loop with a [`StreamError`]; frames decoded
/// before it have already been delivered. Dropping the returned future
/// cancels decoding and the sink is not called again.
pub async fn decode_stream<S, K>(
    mut stream: S,
    sink: &mut K,
    options: DecodeOptions,
) -> Result<DecodeSummary, StreamError>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
    K: FrameSink + ?Sized,
{
    let mut decoder = FrameDecoder::with_options(options);
    let mut summary = DecodeSummary::default();

    loop {
        let next = match options.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, stream.next())
                .await
                .map_err(|_| StreamError::Timeout { idle: limit })?,
            None => stream.next().await,
        };

        let Some(chunk) = next else {
            break;
        };

        let bytes = chunk.map_err(|e| {
            warn!("Chat stream read failed after {} bytes: {}", summary.bytes, e);
            StreamError::from(e)
        })?;
        summary.bytes += bytes.len();

        let results = decoder.feed(&bytes);
        deliver(results, sink, &mut summary, options.strict)?;
    }

    let results = decoder.finish();
    deliver(results, sink, &mut summary, options.strict)?;
    summary.dropped_trailing_bytes = decoder.dropped_trailing_bytes();

    debug!(
        "Chat stream ended: {} frames, {} decode errors, {} bytes, completed={}",
        summary.frames, summary.decode_errors, summary.bytes, summary.completed
    );
    Ok(summary)
}

fn deliver<K>(
    results: Vec<Result<Frame, DecodeError>>,
    sink: &mut K,
    summary: &mut DecodeSummary,
    strict: bool,
) -> Result<(), StreamError>
where
    K: FrameSink + ?Sized,
{
    for result in results {
        match result {
            Ok(frame) => {
                if frame == Frame::Done {
                    summary.completed = true;
                }
                summary.frames += 1;
                sink.on_frame(frame);
            }
            Err(err) if strict => {
                return Err(StreamError::InvalidFrame {
                    message: err.to_string(),
                });
            }
            Err(err) => {
                summary.decode_errors += 1;
                sink.on_decode_error(&err);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FrameCollector;
    use futures::stream;
    use std::time::Duration;

    fn body(chunks: &[&str]) -> impl Stream<Item = Result<Bytes, HttpError>> + Unpin {
        let owned: Vec<Result<Bytes, HttpError>> = chunks
            .iter()
            .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
            .collect();
        stream::iter(owned)
    }

    #[tokio::test]
    async fn test_decode_full_answer() {
        let mut sink = FrameCollector::new();
        let summary = decode_stream(
            body(&[
                "data: {\"type\":\"chunk\",\"content\":\"Hel\"}\n\ndata: {\"type\":\"chu",
                "nk\",\"content\":\"lo\"}\n\n",
                "data: {\"type\":\"sources\",\"sources\":[\"a.txt\"]}\n\ndata: {\"type\":\"done\"}\n\n",
            ]),
            &mut sink,
            DecodeOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(sink.text(), "Hello");
        assert_eq!(summary.frames, 4);
        assert!(summary.completed);
        assert_eq!(summary.decode_errors, 0);
        assert_eq!(summary.dropped_trailing_bytes, 0);
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let mut sink = FrameCollector::new();
        let summary = decode_stream(body(&[]), &mut sink, DecodeOptions::default())
            .await
            .unwrap();
        assert_eq!(summary, DecodeSummary::default());
        assert!(sink.frames.is_empty());
    }

    #[tokio::test]
    async fn test_decode_error_does_not_end_stream() {
        let mut sink = FrameCollector::new();
        let summary = decode_stream(
            body(&["data: {not json\n", "data: {\"type\":\"chunk\",\"content\":\"x\"}\n"]),
            &mut sink,
            DecodeOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(summary.decode_errors, 1);
        assert_eq!(sink.errors.len(), 1);
        assert_eq!(sink.text(), "x");
        assert!(!summary.completed);
    }

    #[tokio::test]
    async fn test_strict_mode_aborts() {
        let mut sink = FrameCollector::new();
        let err = decode_stream(
            body(&[
                "data: {\"type\":\"chunk\",\"content\":\"a\"}\n",
                "data: {not json\n",
                "data: {\"type\":\"chunk\",\"content\":\"b\"}\n",
            ]),
            &mut sink,
            DecodeOptions::new().with_strict(true),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StreamError::InvalidFrame { .. }));
        assert_eq!(sink.text(), "a");
    }

    #[tokio::test]
    async fn test_transport_error_after_frames() {
        let items: Vec<Result<Bytes, HttpError>> = vec![
            Ok(Bytes::from_static(b"data: {\"type\":\"chunk\",\"content\":\"part\"}\n")),
            Err(HttpError::Io("connection reset".to_string())),
            Ok(Bytes::from_static(b"data: {\"type\":\"chunk\",\"content\":\"never\"}\n")),
        ];
        let mut sink = FrameCollector::new();
        let err = decode_stream(stream::iter(items), &mut sink, DecodeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StreamError::ConnectionLost { .. }));
        assert_eq!(sink.text(), "part");
    }

    #[tokio::test]
    async fn test_trailing_bytes_reported() {
        let mut sink = FrameCollector::new();
        let summary = decode_stream(
            body(&["data: {\"type\":\"chunk\",\"content\":\"cut"]),
            &mut sink,
            DecodeOptions::default(),
        )
        .await
        .unwrap();
        assert!(sink.frames.is_empty());
        assert_eq!(summary.dropped_trailing_bytes, 36);
    }

    #[tokio::test]
    async fn test_idle_timeout() {
        let stalled = stream::pending::<Result<Bytes, HttpError>>();
        let mut sink = FrameCollector::new();
        let err = decode_stream(
            stalled,
            &mut sink,
            DecodeOptions::new().with_idle_timeout(Some(Duration::from_millis(50))),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            StreamError::Timeout {
                idle: Duration::from_millis(50)
            }
        );
        assert!(err.user_message().contains("50 ms"));
    }

    #[tokio::test]
    async fn test_closure_sink() {
        let mut count = 0;
        let mut sink = |_frame: Frame| count += 1;
        decode_stream(
            body(&["data: {\"type\":\"done\"}\n"]),
            &mut sink,
            DecodeOptions::default(),
        )
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
