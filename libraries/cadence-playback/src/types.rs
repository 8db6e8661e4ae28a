//! Core types for playback control

use cadence_core::SongId;
use serde::{Deserialize, Serialize};

/// Transport state of a ready track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transport {
    /// Audio is playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing loaded
    Idle,

    /// Waiting for the audio service to finish loading
    Loading,

    /// Track loaded and controllable
    Ready(Transport),

    /// Last load failed; selecting a song again recovers
    Error,
}

impl SessionState {
    /// Whether play/pause/seek are accepted
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Shuffle policy used when shuffle is switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    /// Uniform draw from every other song
    #[default]
    Random,

    /// Prefer songs by a different artist than the current one
    Smart,
}

impl ShuffleMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Smart => "smart",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "random" => Some(Self::Random),
            "smart" => Some(Self::Smart),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShuffleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Start playing as soon as a track finishes loading (default: true)
    pub auto_play: bool,

    /// Shuffle policy (default: Random)
    pub shuffle_mode: ShuffleMode,

    /// Seed for the shuffle RNG; entropy-seeded when absent
    pub shuffle_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_play: true,
            shuffle_mode: ShuffleMode::Random,
            shuffle_seed: None,
        }
    }
}

/// Point-in-time view of the session for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: SessionState,
    pub current_index: usize,
    pub song_id: SongId,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub is_playing: bool,
    pub is_repeat: bool,
    pub is_shuffle: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert!(config.auto_play);
        assert_eq!(config.shuffle_mode, ShuffleMode::Random);
        assert!(config.shuffle_seed.is_none());
    }

    #[test]
    fn shuffle_mode_string_conversion() {
        assert_eq!(ShuffleMode::Random.as_str(), "random");
        assert_eq!(ShuffleMode::Smart.to_string(), "smart");

        assert_eq!(ShuffleMode::from_str("smart"), Some(ShuffleMode::Smart));
        assert_eq!(ShuffleMode::from_str("bag"), None);
    }

    #[test]
    fn ready_states() {
        assert!(SessionState::Ready(Transport::Paused).is_ready());
        assert!(!SessionState::Loading.is_ready());
        assert!(!SessionState::Error.is_ready());
    }
}
