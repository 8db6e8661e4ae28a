/// Static song catalog
use super::{ids::SongId, song::Song};
use crate::error::{CadenceError, Result};
use std::collections::HashSet;

/// Fixed, ordered, non-empty sequence of playable songs
///
/// The catalog is read-only once built. Indices handed out by the catalog
/// stay valid for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog, rejecting an empty song list or duplicate ids
    pub fn new(songs: Vec<Song>) -> Result<Self> {
        if songs.is_empty() {
            return Err(CadenceError::catalog("catalog must contain at least one song"));
        }

        let mut seen = HashSet::with_capacity(songs.len());
        for song in &songs {
            if !seen.insert(&song.id) {
                return Err(CadenceError::catalog(format!(
                    "duplicate song id: {}",
                    song.id
                )));
            }
        }

        Ok(Self { songs })
    }

    /// The catalog bundled with the application
    pub fn builtin() -> Self {
        Self {
            songs: vec![
                Song::new("1", "Amazing Grace", "Christian Worship", 240),
                Song::new("2", "How Great Thou Art", "Christian Worship", 210),
                Song::new("3", "It Is Well", "Christian Worship", 195),
                Song::new("4", "Great Is Thy Faithfulness", "Christian Worship", 225),
                Song::new("5", "Holy Spirit", "Christian Worship", 258),
            ],
        }
    }

    /// Number of songs (always at least one)
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Song at `index`
    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// Index of the song with the given id
    pub fn index_of(&self, id: &SongId) -> Option<usize> {
        self.songs.iter().position(|s| &s.id == id)
    }

    /// Song with the given id
    pub fn find(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }

    /// Whether a song with the given id exists
    pub fn contains(&self, id: &SongId) -> bool {
        self.index_of(id).is_some()
    }

    /// Resolve the song a session should start on
    ///
    /// Falls back to the first song when `id` is absent or unknown.
    pub fn start_index(&self, id: Option<&SongId>) -> usize {
        id.and_then(|id| self.index_of(id)).unwrap_or(0)
    }

    /// Iterate songs in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    /// All songs in catalog order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_songs() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(!catalog.is_empty());

        let durations: Vec<u32> = catalog.iter().map(|s| s.duration_seconds).collect();
        assert_eq!(durations, vec![240, 210, 195, 225, 258]);
    }

    #[test]
    fn empty_catalog_rejected() {
        let err = Catalog::new(Vec::new()).unwrap_err();
        assert!(matches!(err, CadenceError::Catalog(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let songs = vec![
            Song::new("1", "A", "X", 10),
            Song::new("1", "B", "Y", 20),
        ];
        let err = Catalog::new(songs).unwrap_err();
        assert_eq!(err, CadenceError::catalog("duplicate song id: 1"));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.index_of(&SongId::new("4")), Some(3));
        assert_eq!(catalog.find(&SongId::new("4")).unwrap().title, "Great Is Thy Faithfulness");
        assert!(catalog.contains(&SongId::new("5")));
        assert!(!catalog.contains(&SongId::new("99")));
        assert!(catalog.get(5).is_none());
    }

    #[test]
    fn start_index_falls_back_to_first_song() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.start_index(Some(&SongId::new("3"))), 2);
        assert_eq!(catalog.start_index(Some(&SongId::new("missing"))), 0);
        assert_eq!(catalog.start_index(None), 0);
    }
}
