/// Playlist domain types
use super::{
    ids::{PlaylistId, SongId},
    song::Song,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-created, ordered collection of catalog songs
///
/// A song id appears at most once in `songs`. The playlist store is
/// responsible for upholding that when it mutates playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name (trimmed, non-empty)
    pub name: String,

    /// Songs in play order
    pub songs: Vec<Song>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self::with_created_at(id, name, Utc::now())
    }

    /// Create an empty playlist with a specific creation time
    pub fn with_created_at(
        id: PlaylistId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            songs: Vec::new(),
            created_at,
        }
    }

    /// Whether the playlist already holds a song with this id
    pub fn contains(&self, song_id: &SongId) -> bool {
        self.songs.iter().any(|s| &s.id == song_id)
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the playlist has no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Sum of the nominal song durations
    pub fn total_duration_seconds(&self) -> u64 {
        self.songs
            .iter()
            .map(|s| u64::from(s.duration_seconds))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_creation() {
        let playlist = Playlist::new(PlaylistId::new("1"), "Favorites");

        assert_eq!(playlist.name, "Favorites");
        assert!(playlist.is_empty());
        assert_eq!(playlist.len(), 0);
        assert!(playlist.created_at <= Utc::now());
    }

    #[test]
    fn contains_and_total_duration() {
        let mut playlist = Playlist::new(PlaylistId::new("1"), "Favorites");
        playlist.songs.push(Song::new("1", "A", "X", 240));
        playlist.songs.push(Song::new("3", "C", "X", 195));

        assert!(playlist.contains(&SongId::new("3")));
        assert!(!playlist.contains(&SongId::new("2")));
        assert_eq!(playlist.total_duration_seconds(), 435);
    }
}
