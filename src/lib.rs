//! Saturday - a terminal client for the Saturday document-chat server
//!
//! The library holds the streaming decoder, the HTTP client, application
//! state and rendering; the binary wires them to a terminal or runs one-shot
//! commands.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod sse;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
