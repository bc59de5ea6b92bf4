use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind, MouseEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{error, info};

use saturday::app::{App, AppMessage};
use saturday::cli::{run_cli_command, Cli, CliCommand};
use saturday::client::{http_from_config, SaturdayClient};
use saturday::config::Config;
use saturday::events::{dispatch, UiEvent};
use saturday::logging::{self, log_file_path, LogTarget};
use saturday::terminal::{setup_panic_hook, TerminalManager};
use saturday::traits::HttpClient;
use saturday::ui;

/// Lines moved per mouse wheel step.
const WHEEL_LINES: u16 = 3;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command();
    let config = Config::resolve(cli.config.as_deref(), cli.server.as_deref())?;

    // The TUI owns stdout, so it logs to a file
    match (&command, log_file_path()) {
        (CliCommand::Chat, Some(path)) => logging::init(LogTarget::File(path), cli.verbose)?,
        (CliCommand::Chat, None) => {}
        _ => logging::init(LogTarget::Stderr, cli.verbose)?,
    }

    let runtime = tokio::runtime::Runtime::new()?;

    if let Some(result) = runtime.block_on(run_cli_command(&command, &config)) {
        return match result {
            Ok(code) => Ok(code),
            Err(e) => {
                error!(code = e.error_code(), "{}", e);
                eprintln!("Error: {}", e.user_message());
                eprintln!("{}", e.recovery_hint());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    info!(server = %config.server_url, "Starting chat client");
    setup_panic_hook();

    let http: Arc<dyn HttpClient> = Arc::new(http_from_config(&config)?);
    let client = SaturdayClient::new(config.server_url.clone(), http);
    let mut app = App::new(client, &config);

    let mut manager = TerminalManager::new()?;
    let result = runtime.block_on(run_app(manager.terminal(), &mut app));
    manager.restore()?;

    result.map(|_| ExitCode::SUCCESS)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    // First tick completes immediately, giving the startup refresh
    let mut status_poll = tokio::time::interval(app.status_poll_interval());

    loop {
        if app.needs_redraw || app.is_streaming() {
            terminal.draw(|f| ui::render(f, &*app))?;
            app.needs_redraw = false;
        }

        // 16ms tick drives the streaming cursor
        let timeout = tokio::time::sleep(Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            _ = status_poll.tick() => {
                dispatch(app, UiEvent::RefreshStatus);
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Mouse(mouse))) => match mouse.kind {
                        MouseEventKind::ScrollUp => app.scroll_up(WHEEL_LINES),
                        MouseEventKind::ScrollDown => app.scroll_down(WHEEL_LINES),
                        _ => {}
                    },
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("Terminal event error: {}", e);
                        app.quit();
                    }
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
