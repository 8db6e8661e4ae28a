//! Playback session - core orchestration
//!
//! Owns the selected catalog index, the loaded track handle and the
//! play/pause/seek state, and decides what plays next.

use crate::{
    error::{PlaybackError, Result},
    events::SessionEvent,
    navigation,
    service::{AudioService, LoadedTrack, PlaybackHandle},
    status::{AudioEvent, PlaybackStatus},
    types::{PlaybackSnapshot, SessionConfig, SessionState, Transport},
};
use cadence_core::{Catalog, Playlist, PlaylistId, Song};
use cadence_playlists::{PlaylistSnapshot, PlaylistStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

/// Controller for one playback session
///
/// State machine over Idle → Loading → Ready(Playing | Paused), with Error
/// reachable from Loading. The session holds at most one loaded track; any
/// previous track is unloaded before a new one is requested, and the last
/// one is unloaded when the session is dropped.
///
/// All methods run on the caller's thread. Status from the audio service is
/// applied when the caller invokes [`pump`](Self::pump).
pub struct PlaybackSession<S: AudioService> {
    service: S,
    catalog: Arc<Catalog>,
    config: SessionConfig,

    // State
    state: SessionState,
    current_index: usize,
    position_ms: u64,
    duration_ms: u64,
    is_playing: bool,
    is_repeat: bool,
    is_shuffle: bool,

    // Loaded track and its status subscription
    loaded: Option<LoadedTrack>,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl<S: AudioService> PlaybackSession<S> {
    /// Create an idle session positioned on the first catalog song
    pub fn new(service: S, catalog: Arc<Catalog>, config: SessionConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            service,
            catalog,
            config,
            state: SessionState::Idle,
            current_index: 0,
            position_ms: 0,
            duration_ms: 0,
            is_playing: false,
            is_repeat: false,
            is_shuffle: false,
            loaded: None,
            rng,
            pending_events: Vec::new(),
        }
    }

    /// Position an idle session on `index` without loading it
    ///
    /// Out-of-range indices fall back to the first song.
    #[must_use]
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.current_index = if index < self.catalog.len() { index } else { 0 };
        self
    }

    // ===== Loading =====

    /// Select the song at `index` and ask the service to load it
    ///
    /// Any loaded track is released first. The session is `Loading` until
    /// the service reports back through [`pump`](Self::pump). A load the
    /// service rejects up front leaves the session in `Error`; selecting a
    /// song again recovers.
    pub fn load(&mut self, index: usize) -> Result<()> {
        let Some(song) = self.catalog.get(index).cloned() else {
            return Err(PlaybackError::InvalidIndex(index));
        };

        let previous_song_id = self
            .loaded
            .as_ref()
            .map(|_| self.current_song().id.clone());
        self.release_track();

        self.current_index = index;
        self.position_ms = 0;
        self.duration_ms = 0;
        self.is_playing = false;
        self.set_state(SessionState::Loading);
        self.pending_events.push(SessionEvent::TrackChanged {
            index,
            song_id: song.id.clone(),
            previous_song_id,
        });

        tracing::info!("Loading '{}' ({}) at index {}", song.title, song.id, index);

        match self.service.load(&song) {
            Ok(track) => {
                tracing::debug!("Load accepted for {} as {}", song.id, track.handle);
                self.loaded = Some(track);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Error loading audio for {}: {}", song.id, err);
                self.fail(err.to_string());
                Err(PlaybackError::load(&song.id, err.to_string()))
            }
        }
    }

    // ===== Transport =====

    /// Start or resume playback
    ///
    /// Ignored unless a track is ready.
    pub fn play(&mut self) -> Result<()> {
        let Some(handle) = self.ready_handle() else {
            tracing::debug!("play ignored in state {:?}", self.state);
            return Ok(());
        };

        self.service.play(handle)?;
        self.is_playing = true;
        self.set_state(SessionState::Ready(Transport::Playing));
        Ok(())
    }

    /// Pause playback
    ///
    /// Ignored unless a track is ready.
    pub fn pause(&mut self) -> Result<()> {
        let Some(handle) = self.ready_handle() else {
            tracing::debug!("pause ignored in state {:?}", self.state);
            return Ok(());
        };

        self.service.pause(handle)?;
        self.is_playing = false;
        self.set_state(SessionState::Ready(Transport::Paused));
        Ok(())
    }

    /// Pause when playing, play otherwise
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Seek within the loaded track
    ///
    /// The target is clamped to `[0, duration]` once the duration is known.
    /// Does not change whether audio is playing. Ignored unless ready.
    pub fn seek(&mut self, target_seconds: f64) -> Result<()> {
        let Some(handle) = self.ready_handle() else {
            tracing::debug!("seek ignored in state {:?}", self.state);
            return Ok(());
        };

        let mut target_ms = if target_seconds.is_finite() && target_seconds > 0.0 {
            (target_seconds * 1000.0).round() as u64
        } else {
            0
        };
        if self.duration_ms > 0 {
            target_ms = target_ms.min(self.duration_ms);
        }

        self.service.seek(handle, Duration::from_millis(target_ms))?;
        self.position_ms = target_ms;
        self.emit_position_changed();
        Ok(())
    }

    // ===== Navigation =====

    /// Load the next song
    ///
    /// Sequential order wraps to the first song; shuffle draws another song
    /// at random.
    pub fn next(&mut self) -> Result<()> {
        let index = if self.is_shuffle {
            self.shuffle_pick()
        } else {
            navigation::next_index(self.current_index, self.catalog.len())
        };
        self.load(index)
    }

    /// Load the previous song
    ///
    /// Sequential order wraps to the last song; shuffle draws another song
    /// at random.
    pub fn previous(&mut self) -> Result<()> {
        let index = if self.is_shuffle {
            self.shuffle_pick()
        } else {
            navigation::previous_index(self.current_index, self.catalog.len())
        };
        self.load(index)
    }

    /// Toggle repeat of the current song on natural completion
    pub fn toggle_repeat(&mut self) {
        self.set_repeat(!self.is_repeat);
    }

    /// Toggle random selection for next/previous
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.is_shuffle);
    }

    /// Set repeat
    pub fn set_repeat(&mut self, enabled: bool) {
        if self.is_repeat != enabled {
            self.is_repeat = enabled;
            self.pending_events
                .push(SessionEvent::RepeatChanged { enabled });
        }
    }

    /// Set shuffle
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.is_shuffle != enabled {
            self.is_shuffle = enabled;
            self.pending_events
                .push(SessionEvent::ShuffleChanged { enabled });
        }
    }

    // ===== Service Status =====

    /// Apply every event queued on the loaded track's status channel
    ///
    /// Errors from auto-advance are logged; the session stays usable.
    /// Returns the number of events applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;

        while let Some(event) = self
            .loaded
            .as_ref()
            .and_then(|track| track.subscription.try_next())
        {
            applied += 1;
            if let Err(err) = self.apply_audio_event(event) {
                tracing::error!("Failed to apply playback status: {}", err);
            }
        }

        applied
    }

    /// Apply a periodic status report for the loaded track
    ///
    /// Ignored unless a track is ready. On natural completion the current
    /// song restarts when repeat is on, otherwise the next song loads.
    pub fn on_status_update(&mut self, status: PlaybackStatus) -> Result<()> {
        if !self.state.is_ready() {
            tracing::debug!("status ignored in state {:?}", self.state);
            return Ok(());
        }

        self.duration_ms = status.duration_ms;
        self.position_ms = if status.duration_ms > 0 {
            status.position_ms.min(status.duration_ms)
        } else {
            status.position_ms
        };
        self.is_playing = status.is_playing;
        self.set_state(SessionState::Ready(if status.is_playing {
            Transport::Playing
        } else {
            Transport::Paused
        }));
        self.emit_position_changed();

        if status.did_just_finish {
            let song_id = self.current_song().id.clone();
            self.pending_events
                .push(SessionEvent::TrackFinished { song_id });

            if self.is_repeat {
                self.replay_current()?;
            } else {
                self.next()?;
            }
        }

        Ok(())
    }

    fn apply_audio_event(&mut self, event: AudioEvent) -> Result<()> {
        match event {
            AudioEvent::Loaded { duration_ms } => {
                self.on_loaded(duration_ms);
                Ok(())
            }
            AudioEvent::LoadFailed { reason } => {
                if self.state == SessionState::Loading {
                    tracing::error!(
                        "Error loading audio for {}: {}",
                        self.current_song().id,
                        reason
                    );
                    self.release_track();
                    self.fail(reason);
                }
                Ok(())
            }
            AudioEvent::Status(status) => self.on_status_update(status),
        }
    }

    fn on_loaded(&mut self, duration_ms: u64) {
        if self.state != SessionState::Loading {
            return;
        }
        let Some(handle) = self.loaded.as_ref().map(|t| t.handle) else {
            return;
        };

        self.duration_ms = duration_ms;
        self.position_ms = 0;

        if self.config.auto_play {
            match self.service.play(handle) {
                Ok(()) => {
                    self.is_playing = true;
                    self.set_state(SessionState::Ready(Transport::Playing));
                }
                Err(err) => {
                    tracing::warn!("Auto-play failed for {}: {}", handle, err);
                    self.set_state(SessionState::Ready(Transport::Paused));
                }
            }
        } else {
            self.set_state(SessionState::Ready(Transport::Paused));
        }
        self.emit_position_changed();
    }

    fn replay_current(&mut self) -> Result<()> {
        let Some(handle) = self.ready_handle() else {
            return Ok(());
        };

        self.service.seek(handle, Duration::ZERO)?;
        self.service.play(handle)?;
        self.position_ms = 0;
        self.is_playing = true;
        self.set_state(SessionState::Ready(Transport::Playing));
        self.emit_position_changed();
        Ok(())
    }

    // ===== Teardown =====

    /// Release the loaded track and return to `Idle`
    ///
    /// Safe to call repeatedly. The selected index is kept.
    pub fn teardown(&mut self) {
        self.release_track();
        self.position_ms = 0;
        self.duration_ms = 0;
        self.is_playing = false;
        self.set_state(SessionState::Idle);
    }

    /// Unload the handle and drop its subscription
    fn release_track(&mut self) {
        if let Some(track) = self.loaded.take() {
            if let Err(err) = self.service.unload(track.handle) {
                tracing::warn!("Failed to unload {}: {}", track.handle, err);
            }
            // Dropping the subscription unsubscribes from its status channel
        }
    }

    // ===== Playlists =====

    /// Add the current song to a playlist
    pub fn add_current_song_to_playlist(
        &self,
        store: &mut PlaylistStore,
        playlist_id: &PlaylistId,
    ) -> PlaylistSnapshot {
        store.add_song_to_playlist(playlist_id, self.current_song())
    }

    /// Create a playlist that starts out holding the current song
    pub fn create_playlist_with_current_song(
        &self,
        store: &mut PlaylistStore,
        name: &str,
    ) -> Result<Playlist> {
        let playlist = store.create_playlist(name)?;
        store.add_song_to_playlist(&playlist.id, self.current_song());

        Ok(store.get(&playlist.id).cloned().unwrap_or(playlist))
    }

    // ===== State Queries =====

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Selected catalog index (always valid)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Selected song
    pub fn current_song(&self) -> &Song {
        // current_index is only ever set from a validated index
        &self.catalog.songs()[self.current_index]
    }

    /// Playback position in seconds
    pub fn position_seconds(&self) -> f64 {
        self.position_ms as f64 / 1000.0
    }

    /// Track duration in seconds (0 until loaded)
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether repeat is on
    pub fn is_repeat(&self) -> bool {
        self.is_repeat
    }

    /// Whether shuffle is on
    pub fn is_shuffle(&self) -> bool {
        self.is_shuffle
    }

    /// Handle of the loaded track, if any
    pub fn handle(&self) -> Option<PlaybackHandle> {
        self.loaded.as_ref().map(|t| t.handle)
    }

    /// Point-in-time view for display
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            current_index: self.current_index,
            song_id: self.current_song().id.clone(),
            position_seconds: self.position_seconds(),
            duration_seconds: self.duration_seconds(),
            is_playing: self.is_playing,
            is_repeat: self.is_repeat,
            is_shuffle: self.is_shuffle,
        }
    }

    /// Catalog the session plays from
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Audio service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Audio service (mutable, for platform drivers)
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    // ===== Events =====

    /// Take all pending UI events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn ready_handle(&self) -> Option<PlaybackHandle> {
        if self.state.is_ready() {
            self.handle()
        } else {
            None
        }
    }

    fn shuffle_pick(&mut self) -> usize {
        navigation::shuffle_index(
            &self.catalog,
            self.current_index,
            self.config.shuffle_mode,
            &mut self.rng,
        )
    }

    fn fail(&mut self, message: String) {
        self.is_playing = false;
        self.set_state(SessionState::Error);
        self.pending_events.push(SessionEvent::Error { message });
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(SessionEvent::StateChanged { state });
        }
    }

    fn emit_position_changed(&mut self) {
        self.pending_events.push(SessionEvent::PositionChanged {
            position_seconds: self.position_seconds(),
            duration_seconds: self.duration_seconds(),
        });
    }
}

impl<S: AudioService> Drop for PlaybackSession<S> {
    fn drop(&mut self) {
        self.release_track();
    }
}

impl<S: AudioService> std::fmt::Debug for PlaybackSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .field("position_ms", &self.position_ms)
            .field("duration_ms", &self.duration_ms)
            .field("is_repeat", &self.is_repeat)
            .field("is_shuffle", &self.is_shuffle)
            .field("handle", &self.handle())
            .finish_non_exhaustive()
    }
}
