//! Model Module
//!
//! Typed entities and the mapping from decoded records onto them.
//!
//! ## Mapping Rules
//! - A missing field maps to `None`, never to a default
//! - Malformed numbers map to `None` (logged), for every numeric field alike
//! - Booleans: `"1"` is true, any other present value is false

mod playlist;
mod query;
mod song;
mod stats;
mod status;

pub use playlist::{PlaylistEntry, PLAYLIST_KEY};
pub use query::{FieldType, SearchQuery};
pub use song::Song;
pub use stats::Stats;
pub use status::{PlaybackState, Status};
