//! Session Events
//!
//! Event-based communication for UI synchronization. The session queues
//! events as its state changes; the UI drains them with
//! [`PlaybackSession::drain_events`](crate::PlaybackSession::drain_events).

use crate::types::SessionState;
use cadence_core::SongId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Session state changed
    StateChanged {
        /// The new state
        state: SessionState,
    },

    /// A different song was selected for loading
    TrackChanged {
        /// Catalog index of the new song
        index: usize,
        /// ID of the new song
        song_id: SongId,
        /// ID of the song that was selected before
        previous_song_id: Option<SongId>,
    },

    /// Position or duration changed
    PositionChanged {
        /// Current position in seconds
        position_seconds: f64,
        /// Track duration in seconds
        duration_seconds: f64,
    },

    /// Track reached its natural end
    TrackFinished {
        /// ID of the finished song
        song_id: SongId,
    },

    /// Repeat toggled
    RepeatChanged {
        /// New repeat flag
        enabled: bool,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle flag
        enabled: bool,
    },

    /// Recoverable error (load failure)
    Error {
        /// Error message
        message: String,
    },
}
