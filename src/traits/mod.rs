//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming, multipart)
//! - [`FrameSink`] - Receiver for decoded chat stream frames

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError, MultipartFile, Response};
pub use sink::{FrameCollector, FrameSink};
