//! Single-station-at-a-time playback.
//!
//! ```text
//!   STOPPED ──play──▶ PLAYING ──stop──▶ STOPPED
//!                        │
//!                     refresh (stream died)
//!                        ▼
//!                     FAILED ──stop──▶ STOPPED
//! ```
//!
//! At most one station is PLAYING as long as callers stop before playing.
//! [`StationPlayer::select`] does that for them; raw [`StationPlayer::play`]
//! does not.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::display::StationDisplay;
use crate::error::{PlayerError, Result};
use crate::station::Station;
use crate::stream::{AudioFormat, HandleSlot, StreamFactory, StreamHandle, StreamStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationState {
    Stopped,
    Playing,
    Failed,
}

/// Outcome of a user selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Started(usize),
    Stopped(usize),
}

/// Reported by [`StationPlayer::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationEvent {
    Failed { index: usize, reason: String },
}

struct Entry<H> {
    station: Station,
    handle: HandleSlot<H>,
}

pub struct StationPlayer<F: StreamFactory, D> {
    entries: Vec<Entry<F::Handle>>,
    active_index: usize,
    factory: F,
    display: D,
    formats: Vec<AudioFormat>,
    /// Index whose failure was already reported, so `refresh` fires once.
    failed_index: Option<usize>,
}

impl<F, D> StationPlayer<F, D>
where
    F: StreamFactory,
    D: StationDisplay,
{
    pub fn new(stations: Vec<Station>, factory: F, display: D, formats: Vec<AudioFormat>) -> Self {
        let entries = stations
            .into_iter()
            .map(|station| Entry {
                station,
                handle: HandleSlot::Empty,
            })
            .collect();
        Self {
            entries,
            active_index: 0,
            factory,
            display,
            formats,
            failed_index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.entries.iter().map(|e| &e.station)
    }

    pub fn station(&self, index: usize) -> Option<&Station> {
        self.entries.get(index).map(|e| &e.station)
    }

    /// Last station that was played or stopped.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn handle(&self, index: usize) -> Option<&F::Handle> {
        self.entries.get(index)?.handle.get()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn formats(&self) -> &[AudioFormat] {
        &self.formats
    }

    pub fn state(&mut self, index: usize) -> StationState {
        let Some(handle) = self.entries.get_mut(index).and_then(|e| e.handle.get_mut()) else {
            return StationState::Stopped;
        };
        match handle.status() {
            StreamStatus::Playing => StationState::Playing,
            StreamStatus::Failed(_) => StationState::Failed,
            StreamStatus::Idle => StationState::Stopped,
        }
    }

    /// Number of stations whose handle reports playing.
    pub fn playing_count(&mut self) -> usize {
        self.entries
            .iter_mut()
            .filter_map(|e| e.handle.get_mut())
            .map(|h| h.is_playing())
            .filter(|playing| *playing)
            .count()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(PlayerError::InvalidIndex {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Play `index`, or the active station when `None`.
    ///
    /// Reuses the station's handle if it has one. Other stations are left
    /// alone; call [`stop`](Self::stop) first to keep a single stream.
    pub fn play(&mut self, index: Option<usize>) -> Result<()> {
        let index = index.unwrap_or(self.active_index);
        self.check_index(index)?;

        let entry = &mut self.entries[index];
        let factory = &mut self.factory;
        let formats = &self.formats;
        let handle = entry.handle.get_or_insert_with(|| {
            debug!(index, url = %entry.station.url, "creating stream handle");
            factory.create(&entry.station.url, formats)
        });
        handle.play();
        info!(index, station = %entry.station.name, "play");

        self.display.toggle(index, true);
        self.active_index = index;
        if self.failed_index == Some(index) {
            self.failed_index = None;
        }
        Ok(())
    }

    /// Stop the active station and drop its handle.
    pub fn stop(&mut self) {
        let index = self.active_index;
        self.display.toggle(index, false);

        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        if let Some(mut handle) = entry.handle.take() {
            handle.stop();
            info!(index, station = %entry.station.name, "stop");
        }
        if self.failed_index == Some(index) {
            self.failed_index = None;
        }
    }

    /// Toggle station `index` the way a click on its row does.
    ///
    /// Selecting the playing station stops it. Selecting anything else stops
    /// the active station and starts `index`.
    pub fn select(&mut self, index: usize) -> Result<Selection> {
        self.check_index(index)?;

        let was_playing = self.entries[index]
            .handle
            .get_mut()
            .map(|h| h.is_playing())
            .unwrap_or(false);

        self.stop();

        if was_playing {
            Ok(Selection::Stopped(index))
        } else {
            self.play(Some(index))?;
            Ok(Selection::Started(index))
        }
    }

    fn switch_to(&mut self, index: usize) -> Result<Selection> {
        self.stop();
        self.play(Some(index))?;
        Ok(Selection::Started(index))
    }

    /// Stop the active station and play the next one, wrapping at the end.
    pub fn select_next(&mut self) -> Result<Selection> {
        if self.is_empty() {
            return Err(PlayerError::NoStations);
        }
        let next = (self.active_index + 1) % self.len();
        self.switch_to(next)
    }

    /// Stop the active station and play the previous one, wrapping at the start.
    pub fn select_prev(&mut self) -> Result<Selection> {
        if self.is_empty() {
            return Err(PlayerError::NoStations);
        }
        let prev = if self.active_index == 0 {
            self.len() - 1
        } else {
            self.active_index - 1
        };
        self.switch_to(prev)
    }

    pub fn select_random(&mut self) -> Result<Selection> {
        if self.is_empty() {
            return Err(PlayerError::NoStations);
        }
        let index = rand::thread_rng().gen_range(0..self.len());
        self.switch_to(index)
    }

    /// Poll the active stream and report a failure once.
    ///
    /// A failed station has its display turned off but keeps its handle, so
    /// selecting it again goes through `stop` and starts a fresh stream.
    pub fn refresh(&mut self) -> Option<StationEvent> {
        let index = self.active_index;
        if self.failed_index == Some(index) {
            return None;
        }
        let handle = self.entries.get_mut(index)?.handle.get_mut()?;
        let StreamStatus::Failed(reason) = handle.status() else {
            return None;
        };

        warn!(index, %reason, "stream failed");
        self.display.toggle(index, false);
        self.failed_index = Some(index);
        Some(StationEvent::Failed { index, reason })
    }
}
