//! Track selection for next/previous
//!
//! Sequential navigation wraps at both ends of the catalog. Shuffle draws a
//! fresh song on every call with no memory of earlier draws, so a song can
//! come back after a single intervening track.

use crate::types::ShuffleMode;
use cadence_core::Catalog;
use rand::seq::SliceRandom;
use rand::Rng;

/// Index after `current`, wrapping to 0
///
/// Returns 0 for an empty range.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + 1) % len
}

/// Index before `current`, wrapping to the last song
///
/// Returns 0 for an empty range.
pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + len - 1) % len
}

/// Draw a shuffle target other than `current`
///
/// With a single-song catalog the only choice is `current` itself.
pub fn shuffle_index<R: Rng + ?Sized>(
    catalog: &Catalog,
    current: usize,
    mode: ShuffleMode,
    rng: &mut R,
) -> usize {
    let candidates: Vec<usize> = (0..catalog.len()).filter(|&i| i != current).collect();

    let pool = match mode {
        ShuffleMode::Random => candidates,
        ShuffleMode::Smart => {
            let current_artist = catalog.get(current).map(|s| s.artist.as_str());
            let other_artists: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| catalog.get(i).map(|s| s.artist.as_str()) != current_artist)
                .collect();

            if other_artists.is_empty() {
                candidates
            } else {
                other_artists
            }
        }
    };

    pool.choose(rng).copied().unwrap_or(current)
}
