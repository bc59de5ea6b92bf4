//! Input line and key hints.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, InputMode};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};

/// Key hints for the current mode.
pub fn key_hints(mode: InputMode, streaming: bool) -> &'static str {
    match (mode, streaming) {
        (InputMode::UploadPaths, _) => "Enter upload · Esc back",
        (InputMode::Chat, true) => "Esc stop · Ctrl+W web · Ctrl+C quit",
        (InputMode::Chat, false) => {
            "Enter send · Ctrl+W web · Ctrl+U upload · Ctrl+G ingest · Ctrl+R status · Ctrl+C quit"
        }
    }
}

/// Slice of `text` to show in `width` columns so the cursor stays visible.
///
/// Returns the visible text and the cursor column within it.
pub fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let chars: Vec<char> = text.chars().collect();
    let col = |c: &char| c.width().unwrap_or(0);

    // Walk back from the cursor until the line is full, leaving a cell for it
    let mut start = cursor.min(chars.len());
    let mut used = 0;
    while start > 0 && used + col(&chars[start - 1]) < width {
        start -= 1;
        used += col(&chars[start]);
    }

    let mut visible = String::new();
    let mut total = 0;
    for c in &chars[start..] {
        let w = col(c);
        if total + w > width {
            break;
        }
        visible.push(*c);
        total += w;
    }
    (visible, used)
}

pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(format!(" {} ", app.mode.prompt()))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", key_hints(app.mode, app.is_streaming())),
            Style::default().fg(COLOR_DIM),
        )));
    let inner = block.inner(area);

    let (visible, cursor_col) =
        visible_window(app.input.text(), app.input.cursor(), inner.width as usize);
    let paragraph =
        Paragraph::new(Line::from(Span::styled(visible, Style::default().fg(COLOR_ACCENT))))
            .block(block);
    frame.render_widget(paragraph, area);

    if inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position(Position::new(inner.x + cursor_col as u16, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_fits() {
        assert_eq!(visible_window("hello", 5, 20), ("hello".to_string(), 5));
        assert_eq!(visible_window("hello", 2, 20), ("hello".to_string(), 2));
    }

    #[test]
    fn test_long_text_scrolls_to_cursor() {
        let (visible, col) = visible_window("abcdefghij", 10, 5);
        assert_eq!(visible, "ghij");
        assert_eq!(col, 4);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(visible_window("abc", 1, 0), (String::new(), 0));
    }

    #[test]
    fn test_hints_follow_mode() {
        assert!(key_hints(InputMode::Chat, false).starts_with("Enter send"));
        assert!(key_hints(InputMode::Chat, true).starts_with("Esc stop"));
        assert!(key_hints(InputMode::UploadPaths, false).contains("Esc back"));
    }
}
