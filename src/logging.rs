//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to a file; one-shot commands log
//! to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{classify_io_error, SaturdayResult, SystemError};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "SATURDAY_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";
const VERBOSE_DIRECTIVES: &str = "warn,saturday=debug";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default log file: `<data dir>/saturday/saturday.log`.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("saturday").join("saturday.log"))
}

/// Filter directives for the given verbosity and `SATURDAY_LOG` value.
pub fn filter_directives(verbose: bool, env_value: Option<&str>) -> String {
    if verbose {
        return VERBOSE_DIRECTIVES.to_string();
    }
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    let env_value = std::env::var(LOG_ENV).ok();
    let directives = filter_directives(verbose, env_value.as_deref());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber.
pub fn init(target: LogTarget, verbose: bool) -> SaturdayResult<()> {
    let filter = build_filter(verbose);

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| classify_io_error(e, Some(parent.to_path_buf()), "create"))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| classify_io_error(e, Some(path.clone()), "open"))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(filter)
                .try_init()
        }
    };

    installed.map_err(|e| {
        SystemError::Other {
            message: format!("Failed to install log subscriber: {}", e),
        }
        .into()
    })
}
