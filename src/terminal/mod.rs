//! Terminal management with automatic cleanup.
//!
//! ```no_run
//! use saturday::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let mut manager = TerminalManager::new()?;
//!     manager.terminal().draw(|_frame| {})?;
//!     // Restored when `manager` is dropped
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Restores the terminal when dropped.
pub struct TerminalGuard {
    cleaned_up: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { cleaned_up: false }
    }

    /// Restore now. Later calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        leave_tui_mode(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Owns the ratatui terminal for the lifetime of the UI.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen and clear it.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        // From here on the guard undoes raw mode even if setup fails
        let guard = TerminalGuard::new();

        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal before the manager is dropped.
    pub fn restore(&mut self) -> Result<()> {
        self.guard.cleanup();
        self.terminal.show_cursor()?;
        Ok(())
    }
}
