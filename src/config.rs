//! Configuration file handling.
//!
//! Values resolve in order: built-in defaults, the TOML config file,
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::DEFAULT_SERVER_URL;
use crate::sse::DecodeOptions;

/// Environment variable overriding the server URL.
pub const ENV_SERVER: &str = "SATURDAY_SERVER";
/// Environment variable overriding the initial web-search flag.
pub const ENV_USE_WEB: &str = "SATURDAY_USE_WEB";

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDirectory,

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Saturday server
    pub server_url: String,
    /// Total timeout for non-streaming requests
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Abort a chat stream when no bytes arrive for this long
    pub stream_idle_timeout_secs: Option<u64>,
    pub status_poll_interval_secs: u64,
    /// Web search flag at startup
    pub use_web_default: bool,
    /// Abort a chat stream on the first malformed frame
    pub strict_frames: bool,
    /// Decode an unterminated last line instead of dropping it
    pub flush_trailing_line: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            stream_idle_timeout_secs: None,
            status_poll_interval_secs: 30,
            use_web_default: false,
            strict_frames: false,
            flush_trailing_line: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the config file at `path`, or the default file when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Default config file path: `<config dir>/saturday/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dir.join("saturday").join("config.toml"))
    }

    /// Apply `SATURDAY_SERVER` and `SATURDAY_USE_WEB` from the process
    /// environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(ENV_SERVER).filter(|s| !s.trim().is_empty()) {
            self.server_url = server.trim().to_string();
        }
        if let Some(value) = lookup(ENV_USE_WEB) {
            self.use_web_default = parse_bool(ENV_USE_WEB, &value)?;
        }
        Ok(self)
    }

    /// Merge command-line flags over the loaded values.
    pub fn merge_with_args(mut self, server: Option<&str>) -> Self {
        if let Some(server) = server {
            self.server_url = server.to_string();
        }
        self
    }

    /// Load, apply the environment, then command-line flags.
    pub fn resolve(path: Option<&Path>, server: Option<&str>) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.apply_env()?.merge_with_args(server);
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the client unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "server_url".to_string(),
                value: self.server_url.clone(),
            });
        }
        if self.status_poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "status_poll_interval_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_use_web_default(mut self, use_web: bool) -> Self {
        self.use_web_default = use_web;
        self
    }

    pub fn with_strict_frames(mut self, strict: bool) -> Self {
        self.strict_frames = strict;
        self
    }

    pub fn with_flush_trailing_line(mut self, flush: bool) -> Self {
        self.flush_trailing_line = flush;
        self
    }

    pub fn with_stream_idle_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.stream_idle_timeout_secs = secs;
        self
    }

    pub fn with_status_poll_interval_secs(mut self, secs: u64) -> Self {
        self.status_poll_interval_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval_secs)
    }

    /// Decoder options for chat streams.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::new()
            .with_strict(self.strict_frames)
            .with_flush_trailing_line(self.flush_trailing_line)
            .with_idle_timeout(self.stream_idle_timeout_secs.map(Duration::from_secs))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
