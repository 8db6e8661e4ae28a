//! Shell command parsing

use crate::error::CliError;
use cadence_core::{PlaylistId, SongId};
use std::str::FromStr;

/// One line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Select and load a song by id
    Load(SongId),
    Play,
    Pause,
    /// Play/pause button
    Toggle,
    /// Seek to a position in seconds
    Seek(f64),
    Next,
    Previous,
    Repeat,
    Shuffle,
    /// Advance the simulated clock by milliseconds
    Tick(u64),
    Status,
    Playlists,
    /// Create an empty playlist
    Create(String),
    /// Create a playlist holding the current song
    CreateWithCurrent(String),
    Delete(PlaylistId),
    /// Add the current song to a playlist
    Add(PlaylistId),
    Remove(PlaylistId, SongId),
    Songs(PlaylistId),
    Help,
    Quit,
}

/// Longest clock advance a single `tick` accepts (one day)
pub const MAX_TICK_MS: u64 = 24 * 60 * 60 * 1000;

/// Usage text printed by `help`
pub const HELP: &str = "\
load <song-id>              select and load a song
play | pause | toggle       transport control
seek <seconds>              move the playhead
next | prev                 change song
repeat | shuffle            toggle modes
tick <ms>                   advance the simulated clock (up to a day)
status                      show the player
playlists                   list playlists
create <name>               new empty playlist
create-with-current <name>  new playlist holding the current song
delete <playlist-id>        delete a playlist
add <playlist-id>           add the current song to a playlist
remove <playlist-id> <song-id>
songs <playlist-id>         list a playlist's songs
quit";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "load" => Command::Load(SongId::new(required(word, rest)?)),
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" => Command::Toggle,
            "seek" => Command::Seek(parse_number(word, rest)?),
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "repeat" => Command::Repeat,
            "shuffle" => Command::Shuffle,
            "tick" => {
                let millis = parse_number(word, rest)?;
                if millis > MAX_TICK_MS {
                    return Err(CliError::Command(format!(
                        "tick: at most {MAX_TICK_MS} ms at a time"
                    )));
                }
                Command::Tick(millis)
            }
            "status" => Command::Status,
            "playlists" => Command::Playlists,
            // Blank names are passed through so the store can reject them
            "create" => Command::Create(rest.to_string()),
            "create-with-current" => Command::CreateWithCurrent(rest.to_string()),
            "delete" => Command::Delete(PlaylistId::new(required(word, rest)?)),
            "add" => Command::Add(PlaylistId::new(required(word, rest)?)),
            "remove" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next(), args.next()) {
                    (Some(playlist), Some(song), None) => {
                        Command::Remove(PlaylistId::new(playlist), SongId::new(song))
                    }
                    _ => {
                        return Err(CliError::Command(
                            "usage: remove <playlist-id> <song-id>".to_string(),
                        ))
                    }
                }
            }
            "songs" => Command::Songs(PlaylistId::new(required(word, rest)?)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(CliError::Command("empty line".to_string())),
            other => return Err(CliError::Command(format!("unknown command '{other}'"))),
        };

        Ok(command)
    }
}

fn required<'a>(word: &str, rest: &'a str) -> Result<&'a str, CliError> {
    if rest.is_empty() {
        Err(CliError::Command(format!("{word} needs an argument")))
    } else {
        Ok(rest)
    }
}

fn parse_number<T: FromStr>(word: &str, rest: &str) -> Result<T, CliError> {
    required(word, rest)?
        .parse()
        .map_err(|_| CliError::Command(format!("{word}: '{rest}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!("play".parse::<Command>().unwrap(), Command::Play);
        assert_eq!("  prev ".parse::<Command>().unwrap(), Command::Previous);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(
            "load 3".parse::<Command>().unwrap(),
            Command::Load(SongId::new("3"))
        );
        assert_eq!("seek 42.5".parse::<Command>().unwrap(), Command::Seek(42.5));
        assert_eq!("tick 1500".parse::<Command>().unwrap(), Command::Tick(1500));
        assert_eq!(
            "remove 1 4".parse::<Command>().unwrap(),
            Command::Remove(PlaylistId::new("1"), SongId::new("4"))
        );
    }

    #[test]
    fn playlist_names_keep_inner_spaces() {
        assert_eq!(
            "create   Gym Mix ".parse::<Command>().unwrap(),
            Command::Create("Gym Mix".to_string())
        );
        assert_eq!(
            "create".parse::<Command>().unwrap(),
            Command::Create(String::new())
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
        assert!("load".parse::<Command>().is_err());
        assert!("tick soon".parse::<Command>().is_err());
        assert!("tick 18446744073709551615".parse::<Command>().is_err());
        assert_eq!(
            format!("tick {MAX_TICK_MS}").parse::<Command>().unwrap(),
            Command::Tick(MAX_TICK_MS)
        );
        assert!("remove 1".parse::<Command>().is_err());
        assert!("remove 1 2 3".parse::<Command>().is_err());
    }
}
