//! Presentation collaborator: per-station indicators.

/// Receives display toggles from the player.
pub trait StationDisplay {
    fn toggle(&mut self, index: usize, active: bool);
}

/// The three affordances shown for one station row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicators {
    /// Row background highlight.
    pub highlighted: bool,
    /// "LIVE" marker.
    pub live: bool,
    /// "now playing" animation.
    pub playing: bool,
}

impl Indicators {
    pub fn set(&mut self, active: bool) {
        self.highlighted = active;
        self.live = active;
        self.playing = active;
    }

    pub fn is_on(&self) -> bool {
        self.highlighted || self.live || self.playing
    }
}

/// Indicator bundles for every station, indexed like the station list.
#[derive(Debug, Clone, Default)]
pub struct DisplayBoard {
    rows: Vec<Indicators>,
}

impl DisplayBoard {
    pub fn new(len: usize) -> Self {
        Self {
            rows: vec![Indicators::default(); len],
        }
    }

    pub fn get(&self, index: usize) -> Option<&Indicators> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Indicators] {
        &self.rows
    }

    /// Index of the first row that is lit, if any.
    pub fn now_playing(&self) -> Option<usize> {
        self.rows.iter().position(Indicators::is_on)
    }
}

impl StationDisplay for DisplayBoard {
    fn toggle(&mut self, index: usize, active: bool) {
        match self.rows.get_mut(index) {
            Some(row) => row.set(active),
            None => tracing::warn!(index, "display toggle for unknown row"),
        }
    }
}
