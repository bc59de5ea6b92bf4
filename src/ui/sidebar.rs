//! Side panel: documents, uploads, ingestion and notifications.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::state::{IngestState, Session, UploadStatus};

use super::theme::{
    notification_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_RUNNING,
    COLOR_SUCCESS,
};

fn section_header(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn upload_color(status: &UploadStatus) -> ratatui::style::Color {
    match status {
        UploadStatus::Pending => COLOR_DIM,
        UploadStatus::Uploading => COLOR_RUNNING,
        UploadStatus::Uploaded => COLOR_SUCCESS,
        UploadStatus::Failed(_) => COLOR_ERROR,
    }
}

/// Documents section: indexed file count, uploads and ingestion state.
pub fn document_lines(session: &Session) -> Vec<Line<'static>> {
    let count = session
        .server
        .files_count()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        section_header("◈ DOCUMENTS"),
        Line::from(vec![
            Span::styled("Indexed files: ", Style::default().fg(COLOR_DIM)),
            Span::raw(count),
        ]),
        Line::from(""),
    ];

    if session.uploads.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ctrl+U to upload files",
            Style::default().fg(COLOR_DIM),
        )));
    }
    for entry in &session.uploads {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", entry.name)),
            Span::styled(
                entry.status.label().to_string(),
                Style::default().fg(upload_color(&entry.status)),
            ),
        ]));
    }

    let ingest = match &session.ingest {
        IngestState::Idle => None,
        IngestState::Running => Some(("Ingesting...".to_string(), COLOR_RUNNING)),
        IngestState::Succeeded(msg) => Some((msg.clone(), COLOR_SUCCESS)),
        IngestState::Failed(msg) => Some((format!("Error: {}", msg), COLOR_ERROR)),
    };
    if let Some((text, color)) = ingest {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
    }
    lines
}

/// The most recent notifications that fit in `rows`, oldest first.
pub fn notification_lines(session: &Session, rows: usize) -> Vec<Line<'static>> {
    let mut lines = vec![section_header("◈ NOTIFICATIONS")];
    let available = rows.saturating_sub(1);
    let skip = session.notifications.len().saturating_sub(available);
    for note in session.notifications.iter().skip(skip) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", note.at.format("%H:%M")),
                Style::default().fg(COLOR_DIM),
            ),
            Span::styled(
                note.text.clone(),
                Style::default().fg(notification_color(note.level)),
            ),
        ]));
    }
    lines
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(document_lines(&app.session)).wrap(Wrap { trim: true }),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(notification_lines(&app.session, chunks[1].height as usize))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}
