//! StationList component — the whole body of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use radio_core::{DisplayBoard, Indicators, Station};

use crate::theme::{
    style_active, style_cursor, C_BADGE_LIVE, C_MUTED, C_NUMBER_HINT, C_PANEL_BORDER, C_PLAYING,
    C_PRIMARY, C_SECONDARY,
};

/// Frames of the "now playing" animation.
const EQ_FRAMES: [&str; 4] = ["▁▃▅", "▃▅▂", "▅▂▃", "▂▃▅"];

pub struct StationList {
    list_state: ListState,
    len: usize,
}

impl StationList {
    pub fn new(len: usize) -> Self {
        let mut list_state = ListState::default();
        if len > 0 {
            list_state.select(Some(0));
        }
        Self { list_state, len }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let current = self.cursor().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, self.len as isize - 1);
        self.list_state.select(Some(next as usize));
    }

    pub fn select_first(&mut self) {
        if self.len > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if self.len > 0 {
            self.list_state.select(Some(self.len - 1));
        }
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.len {
            self.list_state.select(Some(index));
        }
    }

    pub fn draw<'a>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        stations: impl Iterator<Item = &'a Station>,
        board: &DisplayBoard,
        tick: usize,
    ) {
        let cursor = self.cursor();
        let items: Vec<ListItem> = stations
            .enumerate()
            .map(|(i, station)| {
                let ind = board.get(i).copied().unwrap_or_default();
                render_item(station, i, &ind, cursor == Some(i), tick)
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .title(Span::styled(" stations ", Style::default().fg(C_SECONDARY)));

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn render_item<'a>(
    station: &'a Station,
    index: usize,
    ind: &Indicators,
    is_cursor: bool,
    tick: usize,
) -> ListItem<'a> {
    let row_style = if ind.highlighted {
        style_active()
    } else if is_cursor {
        style_cursor()
    } else {
        Style::default()
    };

    let name_style = if ind.highlighted {
        Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
    } else if is_cursor {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_SECONDARY)
    };

    let mut spans = vec![
        Span::styled(
            format!("{:>3} ", index + 1),
            Style::default().fg(C_NUMBER_HINT),
        ),
        Span::styled(if is_cursor { "›" } else { " " }, Style::default().fg(C_MUTED)),
        Span::raw(" "),
    ];

    if let Some(freq) = &station.freq {
        spans.push(Span::styled(
            format!("{} ", freq),
            Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(station.name.as_str(), name_style));

    if ind.live {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "LIVE",
            Style::default().fg(C_BADGE_LIVE).add_modifier(Modifier::BOLD),
        ));
    }
    if ind.playing {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            EQ_FRAMES[tick % EQ_FRAMES.len()],
            Style::default().fg(C_PLAYING),
        ));
    }

    ListItem::new(Line::from(spans)).style(row_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps() {
        let mut list = StationList::new(3);
        list.move_by(-5);
        assert_eq!(list.cursor(), Some(0));
        list.move_by(10);
        assert_eq!(list.cursor(), Some(2));
        list.select_first();
        list.select_index(9);
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn test_empty_list_has_no_cursor() {
        let mut list = StationList::new(0);
        list.move_by(1);
        list.select_last();
        assert_eq!(list.cursor(), None);
    }
}
