use thiserror::Error;

/// Errors returned by [`StationPlayer`](crate::player::StationPlayer) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("station index {index} out of range (have {len} stations)")]
    InvalidIndex { index: usize, len: usize },
    #[error("station list is empty")]
    NoStations,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
