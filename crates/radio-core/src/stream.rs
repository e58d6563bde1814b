//! Streaming audio collaborator contract.
//!
//! The player never talks to a decoder directly. It asks a [`StreamFactory`]
//! for a handle per station and drives it with `play` / `stop`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio encodings a stream is allowed to be decoded as, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Aac,
    /// HE-AAC ("aac+"), decoded by the plain AAC decoder.
    Aacp,
}

impl AudioFormat {
    /// Preference list used when the config does not override it.
    pub const DEFAULT_PREFERENCE: [AudioFormat; 3] =
        [AudioFormat::Mp3, AudioFormat::Aac, AudioFormat::Aacp];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Aac => "aac",
            Self::Aacp => "aacp",
        }
    }

    /// Name of the decoder that handles this format.
    pub fn decoder(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Aac | Self::Aacp => "aac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a handle reports about its stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StreamStatus {
    #[default]
    Idle,
    /// `play` was issued and the stream has not stopped or failed since.
    Playing,
    /// The stream died without being asked to stop.
    Failed(String),
}

/// One station's connection to its audio stream.
///
/// `play` and `stop` are fire-and-forget: they return immediately and any
/// failure shows up later through [`status`](StreamHandle::status).
pub trait StreamHandle {
    fn play(&mut self);

    /// Stop playback and release the connection.
    fn stop(&mut self);

    /// Current state. Takes `&mut self` so implementations can poll.
    fn status(&mut self) -> StreamStatus;

    fn is_playing(&mut self) -> bool {
        self.status() == StreamStatus::Playing
    }
}

/// Builds handles for stream URIs.
pub trait StreamFactory {
    type Handle: StreamHandle;

    fn create(&mut self, uri: &str, formats: &[AudioFormat]) -> Self::Handle;
}

/// A station's optional owned handle.
///
/// Filled lazily by the first `play` and emptied by `stop`, so a stopped live
/// stream never resumes from stale buffered data.
#[derive(Debug, Default)]
pub enum HandleSlot<H> {
    #[default]
    Empty,
    Loaded(H),
}

impl<H> HandleSlot<H> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn get(&self) -> Option<&H> {
        match self {
            Self::Loaded(h) => Some(h),
            Self::Empty => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut H> {
        match self {
            Self::Loaded(h) => Some(h),
            Self::Empty => None,
        }
    }

    /// Return the loaded handle, creating it with `make` first if empty.
    pub fn get_or_insert_with(&mut self, make: impl FnOnce() -> H) -> &mut H {
        if let Self::Empty = self {
            *self = Self::Loaded(make());
        }
        match self {
            Self::Loaded(h) => h,
            Self::Empty => unreachable!("slot was just filled"),
        }
    }

    /// Take the handle out, leaving the slot empty.
    pub fn take(&mut self) -> Option<H> {
        match std::mem::take(self) {
            Self::Loaded(h) => Some(h),
            Self::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_fills_once() {
        let mut slot: HandleSlot<u32> = HandleSlot::Empty;
        let mut calls = 0;
        *slot.get_or_insert_with(|| {
            calls += 1;
            7
        }) += 1;
        slot.get_or_insert_with(|| {
            calls += 1;
            99
        });
        assert_eq!(calls, 1);
        assert_eq!(slot.get(), Some(&8));
    }

    #[test]
    fn test_slot_take_empties() {
        let mut slot = HandleSlot::Loaded("h");
        assert_eq!(slot.take(), Some("h"));
        assert!(!slot.is_loaded());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_format_decoders() {
        let decoders: Vec<_> = AudioFormat::DEFAULT_PREFERENCE
            .iter()
            .map(|f| f.decoder())
            .collect();
        assert_eq!(decoders, vec!["mp3", "aac", "aac"]);
        assert_eq!(AudioFormat::Aacp.to_string(), "aacp");
    }
}
