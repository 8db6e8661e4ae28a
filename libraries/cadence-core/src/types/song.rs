/// Song domain type
use super::{clock::format_clock, ids::SongId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable catalog entry
///
/// Songs are created when the catalog is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Artwork reference (bundled asset name or URI)
    pub artwork: String,

    /// Audio reference handed to the audio service
    pub audio: String,

    /// Nominal duration in whole seconds
    pub duration_seconds: u32,
}

impl Song {
    /// Create a new song
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_seconds: u32,
    ) -> Self {
        let id = id.into();
        Self {
            artwork: format!("images/song{id}.jpg"),
            audio: format!("audio/song{id}.mp3"),
            id: SongId::new(id),
            title: title.into(),
            artist: artist.into(),
            duration_seconds,
        }
    }

    /// Nominal duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }

    /// Nominal duration rendered as `m:ss`
    pub fn formatted_duration(&self) -> String {
        format_clock(f64::from(self.duration_seconds))
    }
}
