//! Color palette and style constants for the trip board.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_EDITOR_BG: Color = Color::Rgb(20, 20, 32);
pub const C_EDITOR_BORDER: Color = Color::Rgb(120, 100, 200);
pub const C_PRICE: Color = Color::Rgb(255, 200, 80);
pub const C_DESTINATION: Color = Color::Rgb(100, 160, 130);
pub const C_KIND: Color = Color::Rgb(80, 140, 200);
pub const C_FAVORITE: Color = Color::Rgb(255, 210, 50);
pub const C_ACTIVE_TAB: Color = Color::Rgb(80, 200, 120);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_active_tab() -> Style {
    Style::default()
        .fg(C_ACTIVE_TAB)
        .add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_editor() -> Style {
    Style::default().bg(C_EDITOR_BG).fg(C_PRIMARY)
}

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR)
}
