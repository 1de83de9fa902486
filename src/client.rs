//! Command Dispatcher
//!
//! Builds protocol commands, sends them through the session and maps replies
//! onto typed entities.
//!
//! ## Argument Encodings
//! Each command has one fixed encoding:
//! - Values that may contain spaces or quotes (URIs, paths, query text) are
//!   quoted: `add "Some Dir/Song.flac"`
//! - Numbers and flags are plain tokens: `seek 3 42.5`
//!
//! Only the search resolver deliberately tries both encodings.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{FieldType, PlaylistEntry, SearchQuery, Song, Stats, Status, PLAYLIST_KEY};
use crate::network::Session;
use crate::protocol::{decode_many, decode_many_by, decode_one, quote, Command, Encoding, Record};
use crate::search::SearchResolver;

/// Upper bound of the daemon's volume scale
pub const MAX_VOLUME: u8 = 100;

/// Typed command API over a shared session
#[derive(Clone)]
pub struct Client {
    session: Arc<Session>,
}

impl Client {
    /// Create a dispatcher over an existing session
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// The underlying session
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn connect(&self) -> Result<()> {
        self.session.connect()
    }

    pub fn disconnect(&self) {
        self.session.disconnect()
    }

    // =========================================================================
    // Raw Execution
    // =========================================================================

    /// Execute a command and return the raw reply body
    pub fn execute(&self, command: &Command) -> Result<String> {
        self.session.execute(command)
    }

    fn fetch_one(&self, command: &Command) -> Result<Record> {
        Ok(decode_one(&self.execute(command)?))
    }

    fn fetch_songs(&self, command: &Command) -> Result<Vec<Song>> {
        let records = decode_many(&self.execute(command)?);
        Ok(Song::from_records(&records))
    }

    fn run(&self, command: Command) -> Result<()> {
        self.execute(&command).map(drop)
    }

    // =========================================================================
    // Status & Info
    // =========================================================================

    /// Liveness check
    pub fn ping(&self) -> Result<()> {
        self.run(Command::new("ping"))
    }

    pub fn status(&self) -> Result<Status> {
        Ok(Status::from_record(&self.fetch_one(&Command::new("status"))?))
    }

    /// Currently playing song, `None` when nothing is loaded
    pub fn current_song(&self) -> Result<Option<Song>> {
        Ok(Song::from_record(&self.fetch_one(&Command::new("currentsong"))?))
    }

    pub fn stats(&self) -> Result<Stats> {
        Ok(Stats::from_record(&self.fetch_one(&Command::new("stats"))?))
    }

    // =========================================================================
    // Queue
    // =========================================================================

    /// Every song in the queue
    pub fn playlist_info(&self) -> Result<Vec<Song>> {
        self.fetch_songs(&Command::new("playlistinfo"))
    }

    /// Append a file or directory URI to the queue
    pub fn playlist_add(&self, uri: &str) -> Result<()> {
        self.run(Command::with_formatted("add", quote(uri)))
    }

    /// Remove the song at a queue position
    pub fn playlist_delete(&self, position: u32) -> Result<()> {
        self.run(Command::with_tokens("delete", [position]))
    }

    pub fn playlist_clear(&self) -> Result<()> {
        self.run(Command::new("clear"))
    }

    // =========================================================================
    // Database
    // =========================================================================

    /// Every song below `path`, or the whole database
    pub fn list_all_info(&self, path: Option<&str>) -> Result<Vec<Song>> {
        let command = match path {
            Some(path) => Command::with_formatted("listallinfo", quote(path)),
            None => Command::new("listallinfo"),
        };
        self.fetch_songs(&command)
    }

    /// Substring search through the fallback cascade
    ///
    /// An empty result is a normal outcome, not an error.
    pub fn search(&self, field: FieldType, query: &str) -> Result<Vec<Song>> {
        SearchResolver::new(self).resolve(&SearchQuery::new(field, query))
    }

    /// One substring search attempt with an explicit argument encoding
    pub fn search_with(&self, field: FieldType, text: &str, encoding: Encoding) -> Result<Vec<Song>> {
        self.fetch_songs(&query_command("search", field, text, encoding))
    }

    /// Exact-match lookup, no fallbacks
    pub fn find(&self, field: FieldType, query: &str) -> Result<Vec<Song>> {
        self.fetch_songs(&query_command("find", field, query, Encoding::Quoted))
    }

    /// Stored playlists
    pub fn list_playlists(&self) -> Result<Vec<PlaylistEntry>> {
        let body = self.execute(&Command::new("listplaylists"))?;
        Ok(decode_many_by(&body, PLAYLIST_KEY)
            .iter()
            .filter_map(PlaylistEntry::from_record)
            .collect())
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Start playback, optionally at a queue position
    pub fn play(&self, position: Option<u32>) -> Result<()> {
        match position {
            Some(pos) => self.run(Command::with_tokens("play", [pos])),
            None => self.run(Command::new("play")),
        }
    }

    /// Pause (explicit, not a toggle)
    pub fn pause(&self) -> Result<()> {
        self.run(Command::with_tokens("pause", [1]))
    }

    /// Resume from pause
    pub fn resume(&self) -> Result<()> {
        self.run(Command::with_tokens("pause", [0]))
    }

    pub fn stop(&self) -> Result<()> {
        self.run(Command::new("stop"))
    }

    pub fn next(&self) -> Result<()> {
        self.run(Command::new("next"))
    }

    pub fn previous(&self) -> Result<()> {
        self.run(Command::new("previous"))
    }

    /// Seek to `time` seconds in the song at queue position `position`
    pub fn seek(&self, position: u32, time: f64) -> Result<()> {
        self.run(Command::with_tokens(
            "seek",
            [position.to_string(), time.to_string()],
        ))
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Set the volume, flooring and clamping to `0..=100` first
    pub fn set_volume(&self, volume: f64) -> Result<()> {
        self.run(Command::with_tokens("setvol", [clamp_volume(volume)]))
    }

    pub fn set_repeat(&self, on: bool) -> Result<()> {
        self.set_mode("repeat", on)
    }

    pub fn set_random(&self, on: bool) -> Result<()> {
        self.set_mode("random", on)
    }

    pub fn set_single(&self, on: bool) -> Result<()> {
        self.set_mode("single", on)
    }

    pub fn set_consume(&self, on: bool) -> Result<()> {
        self.set_mode("consume", on)
    }

    fn set_mode(&self, mode: &str, on: bool) -> Result<()> {
        self.run(Command::with_tokens(mode, [u8::from(on)]))
    }
}

/// Floor then clamp a requested volume onto the daemon's scale
///
/// NaN maps to 0.
pub fn clamp_volume(volume: f64) -> u8 {
    if volume.is_nan() {
        return 0;
    }
    volume.floor().clamp(0.0, f64::from(MAX_VOLUME)) as u8
}

/// `search`/`find` style command in the requested encoding
fn query_command(name: &str, field: FieldType, text: &str, encoding: Encoding) -> Command {
    match encoding {
        Encoding::Quoted => Command::with_formatted(name, format!("{} {}", field, quote(text))),
        Encoding::Tokens => Command::with_tokens(name, [field.as_str(), text]),
    }
}
