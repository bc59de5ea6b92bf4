//! Keyboard input.
//!
//! Key presses map to a [`Command`] through the [`Keymap`]; commands that
//! express a user intent are turned into [`UiEvent`]s and dispatched to the
//! app like any other event source.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, InputMode};
use crate::events::{dispatch, parse_path_list, UiEvent};

/// Lines moved per PageUp/PageDown.
const PAGE_LINES: u16 = 10;

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

/// Actions a key can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Submit the chat line or confirm upload paths
    Confirm,
    /// Leave upload mode, or cancel the streaming answer
    Escape,
    ToggleWebSearch,
    EnterUploadMode,
    Ingest,
    RefreshStatus,
    ScrollPageUp,
    ScrollPageDown,
    InsertChar(char),
    Backspace,
    DeleteChar,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
}

/// Key bindings.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

impl Keymap {
    pub fn new() -> Self {
        let bindings = [
            (KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit),
            (KeyCombo::plain(KeyCode::Enter), Command::Confirm),
            (KeyCombo::plain(KeyCode::Esc), Command::Escape),
            (KeyCombo::ctrl(KeyCode::Char('w')), Command::ToggleWebSearch),
            (KeyCombo::ctrl(KeyCode::Char('u')), Command::EnterUploadMode),
            (KeyCombo::ctrl(KeyCode::Char('g')), Command::Ingest),
            (KeyCombo::ctrl(KeyCode::Char('r')), Command::RefreshStatus),
            (KeyCombo::plain(KeyCode::PageUp), Command::ScrollPageUp),
            (KeyCombo::plain(KeyCode::PageDown), Command::ScrollPageDown),
            (KeyCombo::plain(KeyCode::Backspace), Command::Backspace),
            (KeyCombo::plain(KeyCode::Delete), Command::DeleteChar),
            (KeyCombo::plain(KeyCode::Left), Command::MoveCursorLeft),
            (KeyCombo::plain(KeyCode::Right), Command::MoveCursorRight),
            (KeyCombo::plain(KeyCode::Home), Command::MoveCursorHome),
            (KeyCombo::plain(KeyCode::End), Command::MoveCursorEnd),
        ]
        .into_iter()
        .collect();
        Self { bindings }
    }

    /// Resolve a key event. Unbound printable characters insert themselves.
    pub fn resolve(&self, key: KeyEvent) -> Option<Command> {
        let combo = KeyCombo::new(key.code, key.modifiers);
        if let Some(command) = self.bindings.get(&combo) {
            return Some(command.clone());
        }
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Command::InsertChar(c))
            }
            _ => None,
        }
    }
}

impl App {
    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = self.keymap.resolve(key) {
            self.mark_dirty();
            self.execute(command);
        }
    }

    /// Insert pasted text into the input line.
    pub fn handle_paste(&mut self, text: &str) {
        self.input.insert_str(text);
        self.mark_dirty();
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.quit(),
            Command::Confirm => self.confirm_input(),
            Command::Escape => match self.mode {
                InputMode::UploadPaths => {
                    self.mode = InputMode::Chat;
                    self.input.clear();
                }
                InputMode::Chat => dispatch(self, UiEvent::CancelStream),
            },
            Command::ToggleWebSearch => {
                let enabled = !self.session.use_web;
                dispatch(self, UiEvent::ToggleWebSearch(enabled));
            }
            Command::EnterUploadMode => {
                self.mode = InputMode::UploadPaths;
                self.input.clear();
            }
            Command::Ingest => dispatch(self, UiEvent::Ingest),
            Command::RefreshStatus => dispatch(self, UiEvent::RefreshStatus),
            Command::ScrollPageUp => self.scroll_up(PAGE_LINES),
            Command::ScrollPageDown => self.scroll_down(PAGE_LINES),
            Command::InsertChar(c) => self.input.insert_char(c),
            Command::Backspace => self.input.backspace(),
            Command::DeleteChar => self.input.delete(),
            Command::MoveCursorLeft => self.input.move_left(),
            Command::MoveCursorRight => self.input.move_right(),
            Command::MoveCursorHome => self.input.move_home(),
            Command::MoveCursorEnd => self.input.move_end(),
        }
    }

    fn confirm_input(&mut self) {
        match self.mode {
            InputMode::Chat => {
                let text = self.input.text().to_string();
                dispatch(self, UiEvent::Submit(text));
            }
            InputMode::UploadPaths => {
                let paths = parse_path_list(&self.input.take());
                self.mode = InputMode::Chat;
                dispatch(self, UiEvent::FilesDropped(paths));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockHttpClient;
    use crate::app::test_support::app_with;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_keymap_resolution() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve(ctrl('c')), Some(Command::Quit));
        assert_eq!(keymap.resolve(ctrl('w')), Some(Command::ToggleWebSearch));
        assert_eq!(keymap.resolve(key(KeyCode::Char('x'))), Some(Command::InsertChar('x')));
        assert_eq!(
            keymap.resolve(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Command::InsertChar('X'))
        );
        assert_eq!(keymap.resolve(ctrl('z')), None);
        assert_eq!(keymap.resolve(key(KeyCode::F(1))), None);
    }

    #[tokio::test]
    async fn test_typing_and_toggle() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        for c in "hey".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input.text(), "he");

        app.handle_key(ctrl('w'));
        assert!(app.session.use_web);
        app.handle_key(ctrl('w'));
        assert!(!app.session.use_web);
    }

    #[tokio::test]
    async fn test_upload_mode_escape() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        app.handle_key(ctrl('u'));
        assert_eq!(app.mode, InputMode::UploadPaths);
        app.handle_paste("a.txt, b.pdf");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, InputMode::Chat);
        assert!(app.input.is_empty());
        assert!(app.session.uploads.is_empty());
    }

    #[tokio::test]
    async fn test_upload_mode_confirm_starts_uploads() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        app.handle_key(ctrl('u'));
        app.handle_paste("a.txt, b.pdf");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, InputMode::Chat);
        let names: Vec<_> = app.session.uploads.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_page_scroll() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.scroll, PAGE_LINES);
        app.handle_key(key(KeyCode::PageDown));
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.scroll, 0);
    }
}
