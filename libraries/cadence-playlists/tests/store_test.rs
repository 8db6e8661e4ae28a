//! Integration tests for the playlist store
//!
//! Covers the store's observable contract: validation, idempotence,
//! silent not-found handling and snapshot isolation.

use cadence_core::types::{Catalog, PlaylistId, Song, SongId};
use cadence_core::CadenceError;
use cadence_playlists::{PlaylistStore, FAVORITES_ID};
use proptest::prelude::*;
use std::sync::Arc;

// ===== Test Helpers =====

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin())
}

fn catalog_song(catalog: &Catalog, id: &str) -> Song {
    catalog.find(&SongId::new(id)).unwrap().clone()
}

// ===== Scenarios =====

#[test]
fn blank_names_leave_collection_unchanged() {
    let mut store = PlaylistStore::new(catalog());

    assert!(matches!(
        store.create_playlist(""),
        Err(CadenceError::Validation(_))
    ));
    assert!(matches!(
        store.create_playlist("   "),
        Err(CadenceError::Validation(_))
    ));

    assert_eq!(store.len(), 1);
    assert_eq!(store.playlists()[0].id.as_str(), FAVORITES_ID);
}

#[test]
fn new_playlist_has_no_songs() {
    let mut store = PlaylistStore::new(catalog());

    let gym = store.create_playlist("Gym Mix").unwrap();

    assert!(store.get_playlist_songs(&gym.id).is_empty());
}

#[test]
fn removing_song_never_added_is_silent() {
    let catalog = catalog();
    let mut store = PlaylistStore::new(Arc::clone(&catalog));
    let favorites = PlaylistId::new("1");
    store.add_song_to_playlist(&favorites, &catalog_song(&catalog, "4"));
    let before = store.get_playlist_songs(&favorites);

    store.remove_song_from_playlist(&favorites, &SongId::new("99"));

    assert_eq!(store.get_playlist_songs(&favorites), before);
}

#[test]
fn snapshots_are_isolated_from_later_mutations() {
    let catalog = catalog();
    let mut store = PlaylistStore::new(Arc::clone(&catalog));
    let favorites = PlaylistId::new("1");

    let before = store.playlists();
    let after = store.add_song_to_playlist(&favorites, &catalog_song(&catalog, "1"));

    assert!(before[0].songs.is_empty());
    assert_eq!(after[0].songs.len(), 1);
    assert_eq!(store.playlists(), after);
}

#[test]
fn deleting_favorites_empties_store() {
    let mut store = PlaylistStore::new(catalog());

    store.delete_playlist(&PlaylistId::new(FAVORITES_ID));

    assert!(store.is_empty());
    assert!(store.resolve(&PlaylistId::new(FAVORITES_ID)).is_none());
    assert!(store.get_playlist_songs(&PlaylistId::new(FAVORITES_ID)).is_empty());
}

#[test]
fn songs_keep_insertion_order_across_playlists() {
    let catalog = catalog();
    let mut store = PlaylistStore::new(Arc::clone(&catalog));
    let evening = store.create_playlist("Evening").unwrap();

    for id in ["5", "1", "3"] {
        store.add_song_to_playlist(&evening.id, &catalog_song(&catalog, id));
    }
    store.add_song_to_playlist(&PlaylistId::new("1"), &catalog_song(&catalog, "2"));

    let ids: Vec<String> = store
        .get_playlist_songs(&evening.id)
        .into_iter()
        .map(|s| s.id.to_string())
        .collect();
    assert_eq!(ids, vec!["5", "1", "3"]);
    assert_eq!(store.get_playlist_songs(&PlaylistId::new("1")).len(), 1);
}

// ===== Property Tests =====

proptest! {
    /// Property: any sequence of adds leaves each song id at most once
    #[test]
    fn adds_never_duplicate(song_indices in prop::collection::vec(0usize..5, 0..40)) {
        let catalog = catalog();
        let mut store = PlaylistStore::new(Arc::clone(&catalog));
        let favorites = PlaylistId::new(FAVORITES_ID);

        for index in &song_indices {
            let song = catalog.get(*index).unwrap().clone();
            store.add_song_to_playlist(&favorites, &song);
        }

        let songs = store.get_playlist_songs(&favorites);
        let mut ids: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);

        let mut distinct = song_indices.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(total, distinct.len());
    }

    /// Property: adding the same song twice never changes the length
    #[test]
    fn second_add_is_noop(index in 0usize..5) {
        let catalog = catalog();
        let mut store = PlaylistStore::new(Arc::clone(&catalog));
        let favorites = PlaylistId::new(FAVORITES_ID);
        let song = catalog.get(index).unwrap().clone();

        store.add_song_to_playlist(&favorites, &song);
        let len_after_first = store.get_playlist_songs(&favorites).len();
        store.add_song_to_playlist(&favorites, &song);

        prop_assert_eq!(store.get_playlist_songs(&favorites).len(), len_after_first);
    }

    /// Property: whitespace-only names are always rejected
    #[test]
    fn whitespace_names_rejected(name in "[ \t\n]{0,8}") {
        let mut store = PlaylistStore::new(catalog());
        prop_assert!(store.create_playlist(&name).is_err());
        prop_assert_eq!(store.len(), 1);
    }
}
