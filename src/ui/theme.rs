//! Color theme constants for the Saturday UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

use crate::state::NotificationLevel;

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color - white for the logo
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// User message label
pub const COLOR_USER: Color = Color::Cyan;

/// Assistant message label - blue #007ACC
pub const COLOR_ASSISTANT: Color = Color::Rgb(0, 122, 204);

/// Success state - green #04B575
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);

/// In-progress state
pub const COLOR_RUNNING: Color = Color::Rgb(128, 128, 128);

pub const COLOR_WARNING: Color = Color::Yellow;

pub const COLOR_ERROR: Color = Color::Red;

/// Color for a notification of the given level.
pub fn notification_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => COLOR_ACCENT,
        NotificationLevel::Success => COLOR_SUCCESS,
        NotificationLevel::Warning => COLOR_WARNING,
        NotificationLevel::Error => COLOR_ERROR,
    }
}
