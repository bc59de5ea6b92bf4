//! CLI module for Saturday.
//!
//! Parses arguments and runs the one-shot commands (`ask`, `upload`,
//! `ingest`, `status`). The `chat` command is handled by the binary, which
//! starts the terminal UI.
//!
//! ```ignore
//! use saturday::cli::{parse_args, run_cli_command};
//!
//! let cli = parse_args(std::env::args())?;
//! if let Some(result) = run_cli_command(&cli.command(), &config).await {
//!     std::process::exit(if result? == ExitCode::SUCCESS { 0 } else { 1 });
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
pub mod commands;

pub use args::{parse_args, Cli, CliCommand};
pub use commands::AskOutcome;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use crate::client::{http_from_config, SaturdayClient};
use crate::config::Config;
use crate::error::SaturdayResult;

/// Run a one-shot command.
///
/// Returns `None` for [`CliCommand::Chat`], which needs the terminal UI.
pub async fn run_cli_command(
    command: &CliCommand,
    config: &Config,
) -> Option<SaturdayResult<ExitCode>> {
    if *command == CliCommand::Chat {
        return None;
    }
    Some(run_one_shot(command, config).await)
}

async fn run_one_shot(command: &CliCommand, config: &Config) -> SaturdayResult<ExitCode> {
    let http = Arc::new(http_from_config(config)?);
    let client = SaturdayClient::new(config.server_url.clone(), http);
    let mut stdout = io::stdout().lock();

    let success = match command {
        CliCommand::Chat => true,
        CliCommand::Ask {
            message,
            web,
            strict,
        } => {
            let options = config
                .decode_options()
                .with_strict(*strict || config.strict_frames);
            let use_web = *web || config.use_web_default;
            commands::ask(&client, &message.join(" "), use_web, options, &mut stdout)
                .await?
                .is_success()
        }
        CliCommand::Upload { paths } => commands::upload(&client, paths, &mut stdout).await? == 0,
        CliCommand::Ingest => {
            commands::ingest(&client, &mut stdout).await?;
            true
        }
        CliCommand::Status { json } => commands::status(&client, *json, &mut stdout).await?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
