//! Entering and leaving the alternate screen.

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter the alternate screen with bracketed paste and mouse capture.
///
/// Raw mode is enabled separately by the caller.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(
        writer,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )
}

/// Restore the normal screen. Errors are ignored so this is safe to call
/// more than once and from a panic hook.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(
        writer,
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        Show
    );
    let _ = writer.flush();
}

/// Restore stdout after a panic or fatal error.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}
