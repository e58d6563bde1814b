pub mod config;
pub mod display;
pub mod error;
pub mod platform;
pub mod player;
pub mod station;
pub mod stream;

pub use display::{DisplayBoard, Indicators, StationDisplay};
pub use error::PlayerError;
pub use player::{Selection, StationEvent, StationPlayer, StationState};
pub use station::Station;
pub use stream::{AudioFormat, HandleSlot, StreamFactory, StreamHandle, StreamStatus};
