//! Transcript pane.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::state::{Author, ChatMessage};

use super::theme::{
    COLOR_ASSISTANT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_USER,
};

/// Streaming cursor glyph, shown on alternating half-second phases.
const CURSOR: &str = "▌";

/// Rows `lines` occupy when wrapped to `width` columns.
pub fn estimate_wrapped_line_count(lines: &[Line], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let cols: usize = line.spans.iter().map(|s| s.content.width()).sum();
            cols.div_ceil(width).max(1)
        })
        .sum()
}

/// Build the lines for one transcript message.
pub fn message_lines(message: &ChatMessage, cursor_visible: bool) -> Vec<Line<'static>> {
    let (label, color) = match message.author {
        Author::User => ("You", COLOR_USER),
        Author::Assistant => ("Saturday", COLOR_ASSISTANT),
    };
    let mut lines = vec![Line::from(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];

    let body_style = if message.error.is_some() {
        Style::default().fg(COLOR_ERROR)
    } else if message.is_thinking() {
        Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };

    let text = match &message.error {
        Some(_) => format!("⚠ {}", message.display_text()),
        None => message.display_text(),
    };
    let mut body: Vec<Line<'static>> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), body_style)))
        .collect();

    if message.streaming && !message.is_thinking() && cursor_visible {
        if let Some(last) = body.last_mut() {
            last.spans.push(Span::styled(CURSOR, Style::default().fg(COLOR_ASSISTANT)));
        }
    }
    lines.extend(body);

    if message.cancelled {
        lines.push(Line::from(Span::styled(
            "(cancelled)",
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        )));
    }
    if !message.sources.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("📚 Sources: {}", message.sources.join(", ")),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.push(Line::from(""));
    lines
}

pub fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Chat ");
    let inner = block.inner(area);

    let cursor_visible = (app.tick_count / 30) % 2 == 0;
    let lines: Vec<Line> = if app.session.transcript.is_empty() {
        vec![Line::from(Span::styled(
            "Ask a question about your documents.",
            Style::default().fg(COLOR_DIM),
        ))]
    } else {
        app.session
            .transcript
            .iter()
            .flat_map(|m| message_lines(m, cursor_visible))
            .collect()
    };

    let total = estimate_wrapped_line_count(&lines, inner.width as usize);
    let max_offset = total.saturating_sub(inner.height as usize);
    let offset = max_offset.saturating_sub(app.scroll as usize);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}
