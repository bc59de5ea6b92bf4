//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedPart, RecordedRequest};
