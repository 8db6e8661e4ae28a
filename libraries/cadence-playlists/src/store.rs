//! Playlist store - owned, replace-on-write playlist collection

use cadence_core::{
    error::{CadenceError, Result},
    types::{Catalog, Playlist, PlaylistId, Song, SongId},
};
use chrono::Utc;
use std::sync::Arc;

/// Id of the playlist every store starts with
pub const FAVORITES_ID: &str = "1";

/// Name of the playlist every store starts with
pub const FAVORITES_NAME: &str = "Favorites";

/// Immutable view of the playlist collection at one point in time
pub type PlaylistSnapshot = Arc<Vec<Playlist>>;

/// In-memory playlist collection
///
/// The store is owned by whoever drives the UI and lent by reference to the
/// components that need it (for example the playback session when adding the
/// current song). Not-found conditions are silent no-ops; the only rejected
/// input is an empty playlist name.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    catalog: Arc<Catalog>,
    playlists: PlaylistSnapshot,

    // Last millisecond timestamp handed out as a playlist id
    last_issued_millis: i64,
}

impl PlaylistStore {
    /// Create a store holding only the default "Favorites" playlist
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let favorites = Playlist::new(PlaylistId::new(FAVORITES_ID), FAVORITES_NAME);

        Self {
            catalog,
            playlists: Arc::new(vec![favorites]),
            last_issued_millis: 0,
        }
    }

    // ===== Mutations =====

    /// Create an empty playlist and append it to the collection
    ///
    /// The name is trimmed before it is stored. A blank name is rejected
    /// without touching the collection.
    pub fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Rejected playlist with blank name");
            return Err(CadenceError::validation("Please enter a playlist name"));
        }

        let playlist = Playlist::new(self.next_id(), name);

        let mut next = self.playlists.as_ref().clone();
        next.push(playlist.clone());
        self.replace(next);

        tracing::info!("Created playlist '{}' ({})", playlist.name, playlist.id);
        Ok(playlist)
    }

    /// Remove the playlist with `id`
    ///
    /// Unknown ids are ignored.
    pub fn delete_playlist(&mut self, id: &PlaylistId) -> PlaylistSnapshot {
        if self.get(id).is_none() {
            tracing::debug!("Delete ignored, no playlist {}", id);
            return self.playlists();
        }

        let next = self
            .playlists
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();

        tracing::info!("Deleted playlist {}", id);
        self.replace(next)
    }

    /// Append `song` to a playlist
    ///
    /// No-op when the playlist is unknown, when it already holds a song with
    /// the same id, or when the song is not part of the catalog.
    pub fn add_song_to_playlist(&mut self, playlist_id: &PlaylistId, song: &Song) -> PlaylistSnapshot {
        if !self.catalog.contains(&song.id) {
            tracing::warn!("Song {} is not in the catalog, not adding to {}", song.id, playlist_id);
            return self.playlists();
        }

        let Some(playlist) = self.get(playlist_id) else {
            tracing::debug!("Add ignored, no playlist {}", playlist_id);
            return self.playlists();
        };

        if playlist.contains(&song.id) {
            tracing::debug!("Song {} already in playlist {}", song.id, playlist_id);
            return self.playlists();
        }

        let next = self
            .playlists
            .iter()
            .map(|p| {
                if &p.id == playlist_id {
                    let mut updated = p.clone();
                    updated.songs.push(song.clone());
                    updated
                } else {
                    p.clone()
                }
            })
            .collect();

        self.replace(next)
    }

    /// Remove a song from a playlist
    ///
    /// Unknown playlists and songs that are not in the playlist are ignored.
    pub fn remove_song_from_playlist(
        &mut self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> PlaylistSnapshot {
        let present = self
            .get(playlist_id)
            .is_some_and(|p| p.contains(song_id));
        if !present {
            tracing::debug!("Remove ignored, song {} not in playlist {}", song_id, playlist_id);
            return self.playlists();
        }

        let next = self
            .playlists
            .iter()
            .map(|p| {
                if &p.id == playlist_id {
                    let mut updated = p.clone();
                    updated.songs.retain(|s| &s.id != song_id);
                    updated
                } else {
                    p.clone()
                }
            })
            .collect();

        self.replace(next)
    }

    // ===== Queries =====

    /// Songs of a playlist in order, empty when the playlist is unknown
    pub fn get_playlist_songs(&self, playlist_id: &PlaylistId) -> Vec<Song> {
        self.get(playlist_id)
            .map(|p| p.songs.clone())
            .unwrap_or_default()
    }

    /// Current snapshot of the whole collection
    pub fn playlists(&self) -> PlaylistSnapshot {
        Arc::clone(&self.playlists)
    }

    /// Playlist with `id`
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    /// Playlist with `id`, or the first playlist when `id` is unknown
    pub fn resolve(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.get(id).or_else(|| self.playlists.first())
    }

    /// Id of the default playlist
    pub fn favorites_id() -> PlaylistId {
        PlaylistId::new(FAVORITES_ID)
    }

    /// Catalog the store validates songs against
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Number of playlists
    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    /// Whether the collection is empty (only after deleting "Favorites")
    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    // ===== Internals =====

    fn replace(&mut self, next: Vec<Playlist>) -> PlaylistSnapshot {
        self.playlists = Arc::new(next);
        Arc::clone(&self.playlists)
    }

    /// Next creation-time id, strictly increasing and never colliding
    fn next_id(&mut self) -> PlaylistId {
        let mut millis = Utc::now().timestamp_millis().max(self.last_issued_millis + 1);
        while self.get(&PlaylistId::from_millis(millis)).is_some() {
            millis += 1;
        }

        self.last_issued_millis = millis;
        PlaylistId::from_millis(millis)
    }
}
