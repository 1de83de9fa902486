//! Stored playlist entity

use crate::protocol::Record;

/// Key that opens every entry of a `listplaylists` reply
pub const PLAYLIST_KEY: &str = "playlist";

/// A stored playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub name: String,
    /// ISO 8601 timestamp as sent by the daemon
    pub last_modified: Option<String>,
}

impl PlaylistEntry {
    /// Returns `None` when the record has no `playlist` field
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            name: record.text(PLAYLIST_KEY)?,
            last_modified: record.text("last-modified"),
        })
    }
}
