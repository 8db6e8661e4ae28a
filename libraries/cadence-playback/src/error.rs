//! Error types for playback control

use cadence_core::{CadenceError, SongId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio service could not load a song
    #[error("Failed to load song {song_id}: {reason}")]
    Load { song_id: SongId, reason: String },

    /// Catalog index out of range
    #[error("Catalog index out of bounds: {0}")]
    InvalidIndex(usize),

    /// Audio service call failed
    #[error("Audio service error: {0}")]
    Service(String),

    /// Domain error (e.g. playlist validation)
    #[error(transparent)]
    Core(#[from] CadenceError),
}

impl PlaybackError {
    /// Create a load error
    pub fn load(song_id: &SongId, reason: impl Into<String>) -> Self {
        Self::Load {
            song_id: song_id.clone(),
            reason: reason.into(),
        }
    }

    /// Create a service error
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
