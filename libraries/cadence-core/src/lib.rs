//! Cadence Core
//!
//! Platform-agnostic domain types and error handling for Cadence.
//!
//! This crate provides the building blocks shared by the playlist store,
//! the playback session and the command-line front end.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Catalog`, `Playlist`
//! - **Identifiers**: `SongId`, `PlaylistId`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{Catalog, Playlist, PlaylistId, SongId};
//!
//! let catalog = Catalog::builtin();
//! let song = catalog.find(&SongId::new("3")).unwrap();
//! assert_eq!(song.formatted_duration(), "3:15");
//!
//! let mut playlist = Playlist::new(PlaylistId::new("7"), "Evening");
//! playlist.songs.push(song.clone());
//! assert!(playlist.contains(&song.id));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use types::{format_clock, Catalog, Playlist, PlaylistId, Song, SongId};
