//! Color palette and style constants for the radio TUI.

use ratatui::style::{Color, Modifier, Style};

pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
/// Row background for the station that is on air.
pub const C_ACTIVE_BG: Color = Color::Rgb(60, 60, 72);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_BADGE_LIVE: Color = Color::Rgb(80, 200, 120);

pub fn style_cursor() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_active() -> Style {
    Style::default()
        .bg(C_ACTIVE_BG)
        .fg(C_PLAYING)
        .add_modifier(Modifier::BOLD)
}
