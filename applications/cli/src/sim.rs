//! Simulated audio playback service
//!
//! Stands in for a platform media API. Nothing is decoded; a virtual clock
//! advanced with [`SimulatedAudioService::tick`] moves the playhead and
//! drives the status events a real service would publish.

use cadence_core::{Song, SongId};
use cadence_playback::{
    status::{subscribe, StatusPublisher},
    AudioEvent, AudioService, LoadedTrack, PlaybackError, PlaybackHandle, PlaybackStatus,
    Result,
};
use std::collections::HashSet;
use std::time::Duration;

/// The one track the simulator holds at a time
#[derive(Debug)]
struct SimTrack {
    handle: PlaybackHandle,
    song_id: SongId,
    publisher: StatusPublisher,
    duration: Duration,
    position: Duration,
    playing: bool,
    loaded: bool,
    fails: bool,
    since_report: Duration,
}

impl SimTrack {
    fn status(&self, did_just_finish: bool) -> PlaybackStatus {
        PlaybackStatus {
            position_ms: self.position.as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
            is_playing: self.playing,
            did_just_finish,
        }
    }

    fn report(&self, did_just_finish: bool) {
        if !self.publisher.publish(AudioEvent::Status(self.status(did_just_finish))) {
            tracing::debug!("No subscriber for {}", self.handle);
        }
    }
}

/// Clock-driven stand-in for a platform audio service
#[derive(Debug)]
pub struct SimulatedAudioService {
    status_interval: Duration,
    failing: HashSet<SongId>,
    next_handle: u64,
    track: Option<SimTrack>,
}

impl SimulatedAudioService {
    /// Create a simulator that reports status every `status_interval`
    pub fn new(status_interval: Duration) -> Self {
        Self {
            status_interval,
            failing: HashSet::new(),
            next_handle: 0,
            track: None,
        }
    }

    /// Make loads of these songs fail once the load "completes"
    #[must_use]
    pub fn with_failing_songs(mut self, songs: impl IntoIterator<Item = SongId>) -> Self {
        self.failing.extend(songs);
        self
    }

    /// Advance the virtual clock
    ///
    /// A pending load completes (or fails) on the first tick. While playing,
    /// the playhead moves by `elapsed`, status is published every status
    /// interval, and reaching the end publishes a final `did_just_finish`.
    pub fn tick(&mut self, elapsed: Duration) {
        let interval = self.status_interval;
        let Some(track) = self.track.as_mut() else {
            return;
        };

        if !track.loaded {
            track.loaded = true;
            let event = if track.fails {
                AudioEvent::LoadFailed {
                    reason: format!("could not open audio for song {}", track.song_id),
                }
            } else {
                AudioEvent::Loaded {
                    duration_ms: track.duration.as_millis() as u64,
                }
            };
            track.publisher.publish(event);
            return;
        }

        if !track.playing {
            return;
        }

        track.position += elapsed;
        track.since_report += elapsed;

        if track.position >= track.duration {
            track.position = track.duration;
            track.playing = false;
            track.since_report = Duration::ZERO;
            track.report(true);
        } else if track.since_report >= interval {
            track.since_report = Duration::ZERO;
            track.report(false);
        }
    }

    /// Whether ticking the clock can change anything
    ///
    /// False while a load is pending or a track is playing.
    pub fn is_idle(&self) -> bool {
        match &self.track {
            Some(track) => track.loaded && !track.playing,
            None => true,
        }
    }

    fn track_mut(&mut self, handle: PlaybackHandle) -> Result<&mut SimTrack> {
        match self.track.as_mut() {
            Some(track) if track.handle == handle && track.loaded && !track.fails => Ok(track),
            _ => Err(PlaybackError::service(format!("unknown handle {handle}"))),
        }
    }
}

impl AudioService for SimulatedAudioService {
    fn load(&mut self, song: &Song) -> Result<LoadedTrack> {
        if song.audio.trim().is_empty() {
            return Err(PlaybackError::load(&song.id, "song has no audio reference"));
        }

        if let Some(previous) = self.track.take() {
            tracing::warn!("Load of {} replaced unreleased {}", song.id, previous.handle);
        }

        self.next_handle += 1;
        let handle = PlaybackHandle::new(self.next_handle);
        let (publisher, subscription) = subscribe(handle);

        tracing::debug!("Simulator loading {} as {}", song.audio, handle);
        self.track = Some(SimTrack {
            handle,
            song_id: song.id.clone(),
            publisher,
            duration: song.duration(),
            position: Duration::ZERO,
            playing: false,
            loaded: false,
            fails: self.failing.contains(&song.id),
            since_report: Duration::ZERO,
        });

        Ok(LoadedTrack {
            handle,
            subscription,
        })
    }

    fn play(&mut self, handle: PlaybackHandle) -> Result<()> {
        let track = self.track_mut(handle)?;
        if track.position >= track.duration {
            track.position = Duration::ZERO;
        }
        track.playing = true;
        track.report(false);
        Ok(())
    }

    fn pause(&mut self, handle: PlaybackHandle) -> Result<()> {
        let track = self.track_mut(handle)?;
        track.playing = false;
        track.report(false);
        Ok(())
    }

    fn seek(&mut self, handle: PlaybackHandle, position: Duration) -> Result<()> {
        let track = self.track_mut(handle)?;
        track.position = position.min(track.duration);
        track.since_report = Duration::ZERO;
        track.report(false);
        Ok(())
    }

    fn unload(&mut self, handle: PlaybackHandle) -> Result<()> {
        match &self.track {
            Some(track) if track.handle == handle => {
                self.track = None;
                Ok(())
            }
            _ => Err(PlaybackError::service(format!("unknown handle {handle}"))),
        }
    }
}
