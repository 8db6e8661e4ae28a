/// CLI configuration
use crate::error::{CliError, Result};
use cadence_core::{Catalog, Song, SongId};
use cadence_playback::{SessionConfig, ShuffleMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_auto_play")]
    pub auto_play: bool,

    #[serde(default)]
    pub shuffle_mode: ShuffleMode,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Song the session starts on (first song when unset)
    #[serde(default)]
    pub start_song: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,

    /// Songs whose loads fail, to exercise error recovery
    #[serde(default)]
    pub failing_songs: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Replaces the builtin catalog when set
    #[serde(default)]
    pub songs: Option<Vec<Song>>,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` when given (it must exist), otherwise `cadence.toml` if
    /// present. Environment variables prefixed with `CADENCE_` override file
    /// values; nested keys use `__`, e.g. `CADENCE_PLAYBACK__AUTO_PLAY=false`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.status_interval_ms == 0 {
            return Err(CliError::Config(
                "simulation.status_interval_ms must be greater than zero".to_string(),
            ));
        }

        let catalog = self.build_catalog()?;

        if let Some(start) = &self.playback.start_song {
            if !catalog.contains(&SongId::new(start.as_str())) {
                return Err(CliError::Config(format!(
                    "playback.start_song {start:?} is not in the catalog"
                )));
            }
        }

        for id in &self.simulation.failing_songs {
            if !catalog.contains(&SongId::new(id.as_str())) {
                return Err(CliError::Config(format!(
                    "simulation.failing_songs entry {id:?} is not in the catalog"
                )));
            }
        }

        Ok(())
    }

    /// Catalog from configuration, or the builtin one
    pub fn build_catalog(&self) -> Result<Catalog> {
        match &self.catalog.songs {
            Some(songs) => Ok(Catalog::new(songs.clone())?),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Session options for the playback library
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            auto_play: self.playback.auto_play,
            shuffle_mode: self.playback.shuffle_mode,
            shuffle_seed: self.playback.shuffle_seed,
        }
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.simulation.status_interval_ms)
    }

    pub fn start_song(&self) -> Option<SongId> {
        self.playback.start_song.as_deref().map(SongId::new)
    }

    pub fn failing_songs(&self) -> Vec<SongId> {
        self.simulation
            .failing_songs
            .iter()
            .map(|id| SongId::new(id.as_str()))
            .collect()
    }
}

// Default values
impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            auto_play: default_auto_play(),
            shuffle_mode: ShuffleMode::default(),
            shuffle_seed: None,
            start_song: None,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval_ms(),
            failing_songs: Vec::new(),
        }
    }
}

fn default_auto_play() -> bool {
    true
}

fn default_status_interval_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = CliConfig::default();
        assert!(config.playback.auto_play);
        assert_eq!(config.playback.shuffle_mode, ShuffleMode::Random);
        assert_eq!(config.status_interval(), Duration::from_millis(500));
        assert_eq!(config.build_catalog().unwrap().len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_file_settings() {
        let file = write_config(
            r#"
[playback]
auto_play = false
shuffle_mode = "smart"
shuffle_seed = 9
start_song = "3"

[simulation]
status_interval_ms = 250
failing_songs = ["2"]
"#,
        );

        let config = CliConfig::load(Some(file.path())).unwrap();
        config.validate().unwrap();

        let session = config.session_config();
        assert!(!session.auto_play);
        assert_eq!(session.shuffle_mode, ShuffleMode::Smart);
        assert_eq!(session.shuffle_seed, Some(9));
        assert_eq!(config.start_song(), Some(SongId::new("3")));
        assert_eq!(config.status_interval(), Duration::from_millis(250));
        assert_eq!(config.failing_songs(), vec![SongId::new("2")]);
    }

    #[test]
    fn loads_custom_catalog() {
        let file = write_config(
            r#"
[[catalog.songs]]
id = "a"
title = "First"
artist = "One"
artwork = "a.jpg"
audio = "a.mp3"
duration_seconds = 30

[[catalog.songs]]
id = "b"
title = "Second"
artist = "Two"
artwork = "b.jpg"
audio = "b.mp3"
duration_seconds = 45
"#,
        );

        let config = CliConfig::load(Some(file.path())).unwrap();
        let catalog = config.build_catalog().unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().title, "Second");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/cadence.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.simulation.status_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.playback.start_song = Some("42".to_string());
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.simulation.failing_songs = vec!["nope".to_string()];
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.catalog.songs = Some(Vec::new());
        assert!(matches!(config.validate(), Err(CliError::Core(_))));
    }
}
