//! Streaming response decoder for the chat endpoint.
//!
//! The chat response body is a sequence of lines. Lines starting with
//! `data: ` carry one JSON frame each:
//! - `{"type":"chunk","content":"..."}` - answer text to append
//! - `{"type":"sources","sources":[...]}` - documents the answer used
//! - `{"type":"error","message":"..."}` - server-side failure
//! - `{"type":"done"}` - end of answer
//!
//! Every other line (blank keep-alives, comments, `event:` lines) is ignored.
//!
//! # Module structure
//! - `frame` - Frame and DecodeError types
//! - `utf8` - Streaming UTF-8 decoder
//! - `decoder` - Synchronous line/frame decoder
//! - `driver` - Async loop over a response byte stream

mod decoder;
mod driver;
mod frame;
mod utf8;

pub use decoder::{parse_frame_line, DecodeOptions, FrameDecoder, DATA_PREFIX};
pub use driver::{decode_stream, DecodeSummary};
pub use frame::{DecodeError, Frame};
pub use utf8::Utf8StreamDecoder;
