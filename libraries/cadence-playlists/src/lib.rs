//! Cadence - Playlist Store
//!
//! Owns the user's playlists for the lifetime of the process. Nothing is
//! persisted; a fresh store starts with a single empty "Favorites" playlist.
//!
//! Every mutation swaps in a new collection and hands it back as a
//! [`PlaylistSnapshot`]. Snapshots already held by readers never change.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{Catalog, SongId};
//! use cadence_playlists::PlaylistStore;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::builtin());
//! let mut store = PlaylistStore::new(Arc::clone(&catalog));
//!
//! let gym = store.create_playlist("Gym Mix").unwrap();
//! let song = catalog.find(&SongId::new("2")).unwrap().clone();
//!
//! store.add_song_to_playlist(&gym.id, &song);
//! store.add_song_to_playlist(&gym.id, &song); // duplicate, ignored
//!
//! assert_eq!(store.get_playlist_songs(&gym.id).len(), 1);
//! ```

mod store;

pub use store::{PlaylistSnapshot, PlaylistStore, FAVORITES_ID, FAVORITES_NAME};
