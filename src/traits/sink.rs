//! Frame sink trait.
//!
//! The decoder pushes frames into a sink synchronously, in arrival order,
//! as soon as each one is complete.

use tracing::warn;

use crate::sse::{DecodeError, Frame};

/// Receiver for decoded frames.
///
/// Closures taking a [`Frame`] implement this trait, so simple callers can
/// pass `|frame| ...` directly.
pub trait FrameSink {
    /// Called once per decoded frame.
    fn on_frame(&mut self, frame: Frame);

    /// Called for a malformed `data: ` line when decoding continues past it.
    fn on_decode_error(&mut self, error: &DecodeError) {
        warn!("Skipping malformed frame: {}", error);
    }
}

impl<F> FrameSink for F
where
    F: FnMut(Frame),
{
    fn on_frame(&mut self, frame: Frame) {
        self(frame)
    }
}

/// Sink that keeps every frame and decode error it receives.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameCollector {
    pub frames: Vec<Frame>,
    pub errors: Vec<DecodeError>,
}

impl FrameCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenated content of all chunk frames.
    pub fn text(&self) -> String {
        self.frames
            .iter()
            .filter_map(|frame| match frame {
                Frame::Chunk { content } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FrameSink for FrameCollector {
    fn on_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    fn on_decode_error(&mut self, error: &DecodeError) {
        self.errors.push(error.clone());
    }
}
