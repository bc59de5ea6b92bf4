//! Wire types for the Saturday HTTP API.

mod request;
mod response;

pub use request::ChatRequest;
pub use response::{ActionResponse, ErrorDetail, StatusResponse};
