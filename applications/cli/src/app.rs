//! Application wiring
//!
//! Owns the playback session (over the simulated audio service) and the
//! playlist store, and turns shell commands into calls on them.

use crate::commands::{Command, HELP};
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::sim::SimulatedAudioService;
use cadence_core::{format_clock, Catalog, Playlist, PlaylistId, SongId};
use cadence_playback::{PlaybackSession, SessionEvent, SessionState, Transport};
use cadence_playlists::PlaylistStore;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    session: PlaybackSession<SimulatedAudioService>,
    store: PlaylistStore,
    status_interval: Duration,
}

impl App {
    /// Build the session and store from configuration
    pub fn new(config: &CliConfig) -> Result<Self> {
        let catalog = Arc::new(config.build_catalog()?);
        let start_index = catalog.start_index(config.start_song().as_ref());

        let service = SimulatedAudioService::new(config.status_interval())
            .with_failing_songs(config.failing_songs());
        let session = PlaybackSession::new(service, Arc::clone(&catalog), config.session_config())
            .with_start_index(start_index);
        let store = PlaylistStore::new(catalog);

        tracing::debug!(
            "App ready with {} songs, starting at index {}",
            session.catalog().len(),
            start_index
        );

        Ok(Self {
            session,
            store,
            status_interval: config.status_interval(),
        })
    }

    /// Run one command and return its output
    ///
    /// Pending service work (such as a load in flight) is settled before the
    /// output is produced, so the result reflects what the player shows.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        let output = match command {
            Command::Load(song_id) => {
                let index = self.index_of(&song_id)?;
                self.session.load(index)?;
                self.settle();
                self.status_line()
            }
            Command::Play => {
                self.session.play()?;
                self.settle();
                self.status_line()
            }
            Command::Pause => {
                self.session.pause()?;
                self.settle();
                self.status_line()
            }
            Command::Toggle => {
                self.session.toggle_play_pause()?;
                self.settle();
                self.status_line()
            }
            Command::Seek(seconds) => {
                self.session.seek(seconds)?;
                self.settle();
                self.status_line()
            }
            Command::Next => {
                self.session.next()?;
                self.settle();
                self.status_line()
            }
            Command::Previous => {
                self.session.previous()?;
                self.settle();
                self.status_line()
            }
            Command::Repeat => {
                self.session.toggle_repeat();
                self.settle();
                format!("repeat {}", on_off(self.session.is_repeat()))
            }
            Command::Shuffle => {
                self.session.toggle_shuffle();
                self.settle();
                format!("shuffle {}", on_off(self.session.is_shuffle()))
            }
            Command::Tick(millis) => {
                self.run_for(Duration::from_millis(millis));
                self.status_line()
            }
            Command::Status => self.status_line(),
            Command::Playlists => self.list_playlists(),
            Command::Create(name) => {
                let playlist = self.store.create_playlist(&name)?;
                format!("created {} ({})", playlist.name, playlist.id)
            }
            Command::CreateWithCurrent(name) => {
                let playlist = self
                    .session
                    .create_playlist_with_current_song(&mut self.store, &name)?;
                format!(
                    "created {} ({}) with {}",
                    playlist.name,
                    playlist.id,
                    self.session.current_song().title
                )
            }
            Command::Delete(playlist_id) => {
                self.store.delete_playlist(&playlist_id);
                format!("{} playlists", self.store.len())
            }
            Command::Add(playlist_id) => {
                self.session
                    .add_current_song_to_playlist(&mut self.store, &playlist_id);
                self.playlist_summary(&playlist_id)
            }
            Command::Remove(playlist_id, song_id) => {
                self.store.remove_song_from_playlist(&playlist_id, &song_id);
                self.playlist_summary(&playlist_id)
            }
            Command::Songs(playlist_id) => self.list_playlist_songs(&playlist_id),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        };

        Ok(output)
    }

    /// Advance the simulated clock once and apply what the service reported
    pub fn advance(&mut self, elapsed: Duration) -> Vec<SessionEvent> {
        self.session.service_mut().tick(elapsed);
        self.session.pump();

        let events = self.session.drain_events();
        for event in &events {
            log_event(event);
        }
        events
    }

    /// Advance the clock by `total` in status-interval steps
    ///
    /// Stops early once the simulated service has nothing left to play, since
    /// further ticks cannot change anything.
    pub fn run_for(&mut self, total: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut remaining = total;

        while !remaining.is_zero() {
            if self.session.service().is_idle() {
                tracing::debug!("Clock skipped {:?} with nothing playing", remaining);
                break;
            }
            let step = remaining.min(self.status_interval);
            events.extend(self.advance(step));
            remaining -= step;
        }
        events
    }

    /// Play from the selected song until `finishes` tracks end naturally
    ///
    /// Songs that fail to load are skipped. Returns the number of tracks that
    /// finished, which is lower than `finishes` only if the step bound is hit.
    pub fn run_demo<W: Write>(&mut self, finishes: usize, out: &mut W) -> Result<usize> {
        self.session.load(self.session.current_index())?;

        let catalog_ms: u64 = self
            .session
            .catalog()
            .iter()
            .map(|song| song.duration().as_millis() as u64)
            .sum();
        let max_steps = demo_step_limit(
            catalog_ms,
            self.status_interval,
            self.session.catalog().len(),
            finishes,
        );

        let mut finished = 0;
        let mut steps = 0;

        let events = self.session.drain_events();
        self.report_events(events, &mut finished, out)?;

        while finished < finishes && steps < max_steps {
            steps += 1;
            let events = self.advance(self.status_interval);
            self.report_events(events, &mut finished, out)?;

            if self.session.state() == SessionState::Error {
                writeln!(out, "skipping {}", self.session.current_song().title)?;
                self.session.next()?;
                let events = self.session.drain_events();
                self.report_events(events, &mut finished, out)?;
            }
        }

        if finished < finishes {
            tracing::warn!("Demo stopped after {} steps with {} finishes", steps, finished);
        }

        Ok(finished)
    }

    // ===== Accessors =====

    pub fn session(&self) -> &PlaybackSession<SimulatedAudioService> {
        &self.session
    }

    pub fn store(&self) -> &PlaylistStore {
        &self.store
    }

    /// One-line view of the player
    pub fn status_line(&self) -> String {
        let song = self.session.current_song();
        format!(
            "[{}] {}. {} - {}  {} / {}  repeat:{} shuffle:{}",
            state_label(self.session.state()),
            song.id,
            song.title,
            song.artist,
            format_clock(self.session.position_seconds()),
            format_clock(self.session.duration_seconds()),
            on_off(self.session.is_repeat()),
            on_off(self.session.is_shuffle()),
        )
    }

    // ===== Internals =====

    fn settle(&mut self) {
        self.advance(Duration::ZERO);
    }

    fn index_of(&self, song_id: &SongId) -> Result<usize> {
        self.session
            .catalog()
            .index_of(song_id)
            .ok_or_else(|| CliError::Command(format!("no song with id {song_id}")))
    }

    fn list_playlists(&self) -> String {
        let snapshot = self.store.playlists();
        if snapshot.is_empty() {
            return "no playlists".to_string();
        }

        snapshot
            .iter()
            .map(describe_playlist)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn playlist_summary(&self, playlist_id: &PlaylistId) -> String {
        match self.store.get(playlist_id) {
            Some(playlist) => describe_playlist(playlist),
            None => format!("no playlist {playlist_id}"),
        }
    }

    fn list_playlist_songs(&self, playlist_id: &PlaylistId) -> String {
        if self.store.get(playlist_id).is_none() {
            return format!("no playlist {playlist_id}");
        }

        let songs = self.store.get_playlist_songs(playlist_id);
        if songs.is_empty() {
            return "(empty)".to_string();
        }

        songs
            .iter()
            .map(|song| {
                format!(
                    "{}. {} - {} ({})",
                    song.id,
                    song.title,
                    song.artist,
                    song.formatted_duration()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn report_events<W: Write>(
        &self,
        events: Vec<SessionEvent>,
        finished: &mut usize,
        out: &mut W,
    ) -> Result<()> {
        for event in events {
            match event {
                SessionEvent::TrackChanged { song_id, .. } => {
                    if let Some(song) = self.session.catalog().find(&song_id) {
                        writeln!(out, "now playing: {} - {}", song.title, song.artist)?;
                    }
                }
                SessionEvent::TrackFinished { song_id } => {
                    *finished += 1;
                    writeln!(out, "finished: {song_id}")?;
                }
                SessionEvent::Error { message } => {
                    writeln!(out, "error: {message}")?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Catalog listing for `cadence catalog`, as a table or as JSON
pub fn render_catalog(catalog: &Catalog, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(catalog.songs())?);
    }

    Ok(catalog
        .iter()
        .map(|song| {
            format!(
                "{:>3}  {:<32} {:<24} {}",
                song.id.as_str(),
                song.title,
                song.artist,
                song.formatted_duration()
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Upper bound on clock steps for a demo run
fn demo_step_limit(catalog_ms: u64, interval: Duration, songs: usize, finishes: usize) -> u64 {
    let interval_ms = (interval.as_millis() as u64).max(1);
    let steps_per_pass = (catalog_ms / interval_ms).saturating_add((songs as u64).saturating_mul(4));
    steps_per_pass.saturating_mul((finishes as u64).saturating_add(1))
}

fn describe_playlist(playlist: &Playlist) -> String {
    format!(
        "{}  {}  ({} songs, {})",
        playlist.id,
        playlist.name,
        playlist.len(),
        format_clock(playlist.total_duration_seconds() as f64)
    )
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::StateChanged { state } => tracing::debug!("State: {:?}", state),
        SessionEvent::TrackChanged { index, song_id, .. } => {
            tracing::info!("Track changed to {} (index {})", song_id, index);
        }
        SessionEvent::PositionChanged { .. } => {}
        SessionEvent::TrackFinished { song_id } => tracing::info!("Finished {}", song_id),
        SessionEvent::RepeatChanged { enabled } => tracing::debug!("Repeat: {}", enabled),
        SessionEvent::ShuffleChanged { enabled } => tracing::debug!("Shuffle: {}", enabled),
        SessionEvent::Error { message } => tracing::warn!("Playback error: {}", message),
    }
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Idle",
        SessionState::Loading => "Loading",
        SessionState::Ready(Transport::Playing) => "Playing",
        SessionState::Ready(Transport::Paused) => "Paused",
        SessionState::Error => "Error",
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut config = CliConfig::default();
        config.playback.shuffle_seed = Some(7);
        App::new(&config).unwrap()
    }

    fn run(app: &mut App, line: &str) -> String {
        app.execute(line.parse().unwrap()).unwrap()
    }

    #[test]
    fn load_settles_into_playing() {
        let mut app = app();

        let line = run(&mut app, "load 2");

        assert_eq!(app.session().current_index(), 1);
        assert_eq!(
            app.session().state(),
            SessionState::Ready(Transport::Playing)
        );
        assert!(line.starts_with("[Playing] 2."));
    }

    #[test]
    fn unknown_song_is_a_command_error() {
        let mut app = app();
        let err = app.execute(Command::Load(SongId::new("99"))).unwrap_err();
        assert!(matches!(err, CliError::Command(_)));
        assert_eq!(app.session().state(), SessionState::Idle);
    }

    #[test]
    fn tick_moves_the_playhead() {
        let mut app = app();
        run(&mut app, "load 1");

        let line = run(&mut app, "tick 1500");

        assert_eq!(app.session().position_seconds(), 1.5);
        assert!(line.contains("0:01 / 4:00"));
    }

    #[test]
    fn finishing_advances_to_next_song() {
        let mut app = app();
        run(&mut app, "load 1");

        let events = app.run_for(Duration::from_millis(240_500));

        assert!(events.contains(&SessionEvent::TrackFinished {
            song_id: SongId::new("1")
        }));
        assert_eq!(app.session().current_index(), 1);
        assert!(app.session().is_playing());
    }

    #[test]
    fn repeat_restarts_same_song() {
        let mut app = app();
        run(&mut app, "load 1");
        assert_eq!(run(&mut app, "repeat"), "repeat on");

        app.run_for(Duration::from_millis(240_500));

        assert_eq!(app.session().current_index(), 0);
        assert!(app.session().is_playing());
        assert!(app.session().position_seconds() < 1.0);
    }

    #[test]
    fn failing_song_recovers_on_next() {
        let mut config = CliConfig::default();
        config.simulation.failing_songs = vec!["2".to_string()];
        let mut app = App::new(&config).unwrap();

        let line = run(&mut app, "load 2");
        assert!(line.starts_with("[Error]"));

        run(&mut app, "next");
        assert_eq!(app.session().current_index(), 2);
        assert!(app.session().state().is_ready());
    }

    #[test]
    fn pause_and_toggle() {
        let mut app = app();
        run(&mut app, "load 1");

        assert!(run(&mut app, "pause").starts_with("[Paused]"));
        assert!(run(&mut app, "toggle").starts_with("[Playing]"));
    }

    #[test]
    fn playlist_commands() {
        let mut app = app();
        run(&mut app, "load 3");

        let created = run(&mut app, "create-with-current Evening");
        assert!(created.contains("Evening"));

        let evening = app.store().playlists()[1].clone();
        assert_eq!(evening.songs.len(), 1);
        assert_eq!(evening.songs[0].id, SongId::new("3"));

        run(&mut app, "add 1");
        run(&mut app, "add 1");
        assert_eq!(app.store().get_playlist_songs(&PlaylistId::new("1")).len(), 1);

        run(&mut app, "remove 1 3");
        assert_eq!(run(&mut app, "songs 1"), "(empty)");

        assert_eq!(run(&mut app, &format!("delete {}", evening.id)), "1 playlists");
    }

    #[test]
    fn blank_playlist_name_rejected() {
        let mut app = app();
        assert!(app.execute(Command::Create("   ".to_string())).is_err());
        assert_eq!(app.store().len(), 1);
    }

    #[test]
    fn tick_while_paused_returns_immediately() {
        let mut app = app();
        run(&mut app, "load 1");
        run(&mut app, "tick 2000");
        run(&mut app, "pause");

        let events = app.run_for(Duration::from_millis(u64::MAX));

        assert!(events.is_empty());
        assert_eq!(app.session().position_seconds(), 2.0);
        assert_eq!(app.session().state(), SessionState::Ready(Transport::Paused));
    }

    #[test]
    fn tick_before_anything_loaded_is_a_no_op() {
        let mut app = app();
        let line = run(&mut app, "tick 3600000");
        assert!(line.starts_with("[Idle] 1."));
    }

    #[test]
    fn demo_step_limit_saturates() {
        let interval = Duration::from_millis(500);
        assert_eq!(demo_step_limit(10_000, interval, 2, 0), 28);
        assert_eq!(demo_step_limit(10_000, interval, 2, 1), 56);
        assert_eq!(demo_step_limit(10_000, interval, 2, usize::MAX), u64::MAX);
        assert_eq!(demo_step_limit(u64::MAX, Duration::ZERO, usize::MAX, 3), u64::MAX);
    }

    #[test]
    fn catalog_renders_as_table_and_json() {
        let catalog = Catalog::builtin();

        let table = render_catalog(&catalog, false).unwrap();
        assert_eq!(table.lines().count(), 5);
        assert!(table.lines().next().unwrap().trim_start().starts_with("1  "));

        let json = render_catalog(&catalog, true).unwrap();
        let songs: Vec<cadence_core::Song> = serde_json::from_str(&json).unwrap();
        assert_eq!(songs.as_slice(), catalog.songs());
    }

    #[test]
    fn demo_counts_natural_finishes() {
        let mut app = app();
        let mut out = Vec::new();

        let finished = app.run_demo(2, &mut out).unwrap();

        assert_eq!(finished, 2);
        assert_eq!(app.session().current_index(), 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("finished: 1"));
        assert!(text.contains("finished: 2"));
    }
}
