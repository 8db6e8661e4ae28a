//! Audio playback service abstraction
//!
//! Decoding and output live outside this crate. Platforms plug in an
//! implementation of [`AudioService`]; the session only wires calls and
//! status events together.

use crate::error::Result;
use crate::status::StatusSubscription;
use cadence_core::Song;
use std::fmt;
use std::time::Duration;

/// Opaque handle to a track loaded by the audio service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(u64);

impl PlaybackHandle {
    /// Wrap a service-specific handle id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw handle id
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A load request the service accepted
///
/// Completion (or late failure) arrives on `subscription` as
/// [`AudioEvent::Loaded`](crate::status::AudioEvent::Loaded) or
/// [`AudioEvent::LoadFailed`](crate::status::AudioEvent::LoadFailed).
#[derive(Debug)]
pub struct LoadedTrack {
    /// Handle for subsequent calls
    pub handle: PlaybackHandle,

    /// Status events for this handle
    pub subscription: StatusSubscription,
}

/// Platform audio playback service
///
/// All calls return immediately. Work that takes time (loading, playing)
/// reports back through the track's status subscription.
pub trait AudioService {
    /// Start loading the song's audio
    ///
    /// # Returns
    /// * `Ok(track)` - Request accepted, watch `track.subscription`
    /// * `Err(_)` - Rejected up front (unknown asset, no device, ...)
    fn load(&mut self, song: &Song) -> Result<LoadedTrack>;

    /// Start or resume playback
    fn play(&mut self, handle: PlaybackHandle) -> Result<()>;

    /// Pause playback
    fn pause(&mut self, handle: PlaybackHandle) -> Result<()>;

    /// Move to `position` from the start of the track
    ///
    /// Implementations clamp positions past the end of the track.
    fn seek(&mut self, handle: PlaybackHandle, position: Duration) -> Result<()>;

    /// Release the track and stop reporting status for it
    fn unload(&mut self, handle: PlaybackHandle) -> Result<()>;
}
