//! Cadence - Playback Control
//!
//! Platform-agnostic playback session control for Cadence.
//!
//! This crate provides:
//! - A playback session state machine (Idle, Loading, Ready, Error)
//! - Sequential and shuffled next/previous selection over a fixed catalog
//! - Repeat and auto-advance on natural track completion
//! - A typed status channel from the audio service to the session
//! - UI events for state, track and position changes
//!
//! # Architecture
//!
//! `cadence-playback` does not decode or output audio. Platforms provide an
//! [`AudioService`]; the session calls it and consumes the status events it
//! publishes for each loaded track.
//!
//! # Example: Platform Integration
//!
//! ```rust
//! use cadence_core::{Catalog, Song};
//! use cadence_playback::{
//!     status::{subscribe, AudioEvent, StatusPublisher},
//!     AudioService, LoadedTrack, PlaybackHandle, PlaybackSession, Result,
//!     SessionConfig, SessionState, Transport,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! // Implement AudioService for your platform
//! #[derive(Default)]
//! struct InstantService {
//!     publishers: Vec<StatusPublisher>,
//! }
//!
//! impl AudioService for InstantService {
//!     fn load(&mut self, song: &Song) -> Result<LoadedTrack> {
//!         let handle = PlaybackHandle::new(self.publishers.len() as u64 + 1);
//!         let (publisher, subscription) = subscribe(handle);
//!         publisher.publish(AudioEvent::Loaded {
//!             duration_ms: u64::from(song.duration_seconds) * 1000,
//!         });
//!         self.publishers.push(publisher);
//!         Ok(LoadedTrack { handle, subscription })
//!     }
//!
//!     fn play(&mut self, _handle: PlaybackHandle) -> Result<()> { Ok(()) }
//!     fn pause(&mut self, _handle: PlaybackHandle) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _handle: PlaybackHandle, _position: Duration) -> Result<()> { Ok(()) }
//!     fn unload(&mut self, _handle: PlaybackHandle) -> Result<()> { Ok(()) }
//! }
//!
//! let mut session = PlaybackSession::new(
//!     InstantService::default(),
//!     Arc::new(Catalog::builtin()),
//!     SessionConfig::default(),
//! );
//!
//! session.load(0)?;
//! session.pump(); // apply status events on this thread
//! assert_eq!(session.state(), SessionState::Ready(Transport::Playing));
//!
//! session.next()?;
//! session.pump();
//! assert_eq!(session.current_index(), 1);
//! # Ok::<(), cadence_playback::PlaybackError>(())
//! ```

mod error;
mod events;
pub mod navigation;
mod service;
mod session;
pub mod status;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use service::{AudioService, LoadedTrack, PlaybackHandle};
pub use session::PlaybackSession;
pub use status::{AudioEvent, PlaybackStatus, StatusSubscription};
pub use types::{PlaybackSnapshot, SessionConfig, SessionState, ShuffleMode, Transport};
