mod catalog;
mod clock;
mod ids;
mod playlist;
mod song;

pub use catalog::Catalog;
pub use clock::format_clock;
pub use ids::{PlaylistId, SongId};
pub use playlist::Playlist;
pub use song::Song;
