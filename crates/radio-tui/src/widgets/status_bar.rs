//! Status bar — now-playing line, last log message, keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY, C_SEPARATOR};

const KEYS: &[(&str, &str)] = &[
    ("enter", "play/stop"),
    ("s", "stop"),
    ("p", "resume"),
    ("n/N", "next/prev"),
    ("r", "random"),
    (".", "current"),
    ("q", "quit"),
];

/// Draw the now-playing line.
pub fn draw_now_playing(frame: &mut Frame, area: Rect, now_playing: Option<&str>) {
    let line = match now_playing {
        Some(name) => Line::from(vec![
            Span::styled("● ", Style::default().fg(C_PLAYING)),
            Span::styled(
                name.to_string(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("○ ", Style::default().fg(C_MUTED)),
            Span::styled("stopped", Style::default().fg(C_SECONDARY)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the log bar: last log line, red when it is an error.
pub fn draw_log_bar(frame: &mut Frame, area: Rect, last_log: Option<&(String, bool)>) {
    let line = match last_log {
        Some((msg, is_error)) => {
            let color = if *is_error { C_ACCENT } else { C_SECONDARY };
            Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(C_SEPARATOR),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(KEYS.len() * 3);
    for (key, label) in KEYS {
        spans.push(Span::styled(
            *key,
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", label), Style::default().fg(C_MUTED)));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
