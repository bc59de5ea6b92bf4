//! UI rendering for the Saturday chat client
//!
//! Layout:
//! - Header: title, web-search indicator, server status
//! - Left: chat transcript
//! - Right: documents, uploads, ingestion and notifications
//! - Bottom: input line with key hints

mod chat;
mod input;
mod sidebar;
mod theme;

pub use chat::{estimate_wrapped_line_count, message_lines};
pub use input::{key_hints, visible_window};
pub use theme::{
    COLOR_ACCENT, COLOR_ASSISTANT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER,
    COLOR_SUCCESS, COLOR_USER, COLOR_WARNING,
};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::state::{ServerStatusView, Session};

/// Terminal width below which the side panel is hidden.
const NARROW_WIDTH: u16 = 70;

/// Header line: title, web-search flag and server status.
pub fn header_line(session: &Session) -> Line<'static> {
    let (web_text, web_color) = if session.use_web {
        ("Web: on", COLOR_SUCCESS)
    } else {
        ("Web: off", COLOR_DIM)
    };
    let status_color = match session.server {
        ServerStatusView::Online { .. } => COLOR_SUCCESS,
        ServerStatusView::Unknown => COLOR_DIM,
        ServerStatusView::Offline | ServerStatusView::Error(_) => COLOR_ERROR,
    };
    Line::from(vec![
        Span::styled(
            " SATURDAY ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(COLOR_BORDER)),
        Span::styled(web_text, Style::default().fg(web_color)),
        Span::styled(" │ ", Style::default().fg(COLOR_BORDER)),
        Span::styled(
            format!("● {}", session.server.label()),
            Style::default().fg(status_color),
        ),
    ])
}

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Body
            Constraint::Length(3), // Input
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(&app.session)), rows[0]);
    render_body(frame, rows[1], app);
    input::render_input(frame, rows[2], app);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    if area.width < NARROW_WIDTH {
        chat::render_transcript(frame, area, app);
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);
    chat::render_transcript(frame, columns[0], app);
    sidebar::render_sidebar(frame, columns[1], app);
}
