//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat with your documents from the terminal.
#[derive(Debug, Parser)]
#[command(name = "saturday")]
#[command(author, version, about = "Terminal client for the Saturday RAG server")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Server URL (overrides config and SATURDAY_SERVER)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Cli {
    /// The subcommand to run; the interactive client when none is given.
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Chat)
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Open the interactive chat client (default)
    Chat,

    /// Ask one question and stream the answer to stdout
    Ask {
        /// Question to send
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Let the server search the web
        #[arg(long)]
        web: bool,

        /// Fail on the first malformed frame
        #[arg(long)]
        strict: bool,
    },

    /// Upload documents to the server
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Rebuild the server's document index
    Ingest,

    /// Show server status
    Status {
        /// Print the raw status as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments, including the program name.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chat() {
        let cli = parse_args(["saturday"]).unwrap();
        assert_eq!(cli.command(), CliCommand::Chat);
        assert!(cli.server.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_ask() {
        let cli = parse_args(["saturday", "ask", "what", "is", "rag?", "--web"]).unwrap();
        assert_eq!(
            cli.command(),
            CliCommand::Ask {
                message: vec!["what".into(), "is".into(), "rag?".into()],
                web: true,
                strict: false,
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse_args([
            "saturday",
            "status",
            "--json",
            "--server",
            "http://10.0.0.5:8081",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.command(), CliCommand::Status { json: true });
        assert_eq!(cli.server.as_deref(), Some("http://10.0.0.5:8081"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_upload_requires_paths() {
        assert!(parse_args(["saturday", "upload"]).is_err());
        let cli = parse_args(["saturday", "upload", "a.txt", "b.pdf"]).unwrap();
        assert_eq!(
            cli.command(),
            CliCommand::Upload {
                paths: vec![PathBuf::from("a.txt"), PathBuf::from("b.pdf")]
            }
        );
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(parse_args(["saturday", "ask"]).is_err());
    }
}
