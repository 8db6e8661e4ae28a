//! Cadence command-line front end
//!
//! Wires the playback session and playlist store to a simulated audio
//! service so the whole core can be driven from a terminal or a script.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
pub mod sim;

pub use app::App;
pub use config::CliConfig;
pub use error::{CliError, Result};
