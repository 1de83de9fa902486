//! Status entity

use crate::protocol::Record;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackState {
    /// Parse the daemon's `state` value
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "play" => Some(PlaybackState::Playing),
            "pause" => Some(PlaybackState::Paused),
            "stop" => Some(PlaybackState::Stopped),
            other => {
                tracing::warn!("Unknown playback state {:?}", other);
                None
            }
        }
    }
}

/// Player and queue status
///
/// Values are trusted as received; e.g. a daemon without a mixer reports
/// volume `-1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub volume: Option<i32>,
    pub repeat: Option<bool>,
    pub random: Option<bool>,
    pub single: Option<bool>,
    pub consume: Option<bool>,
    pub state: Option<PlaybackState>,
    pub playlist_version: Option<u32>,
    pub playlist_length: Option<u32>,
    /// Queue position of the current song
    pub song: Option<u32>,
    pub song_id: Option<u32>,
    pub next_song: Option<u32>,
    pub next_song_id: Option<u32>,
    pub elapsed: Option<f64>,
    pub duration: Option<f64>,
    /// Kilobits per second
    pub bitrate: Option<u32>,
    /// `samplerate:bits:channels`
    pub audio: Option<String>,
    /// Last player error, if any
    pub error: Option<String>,
}

impl Status {
    pub fn from_record(record: &Record) -> Self {
        Self {
            volume: record.parse("volume"),
            repeat: record.flag("repeat"),
            random: record.flag("random"),
            single: record.flag("single"),
            consume: record.flag("consume"),
            state: record.get("state").and_then(PlaybackState::from_wire),
            playlist_version: record.parse("playlist"),
            playlist_length: record.parse("playlistlength"),
            song: record.parse("song"),
            song_id: record.parse("songid"),
            next_song: record.parse("nextsong"),
            next_song_id: record.parse("nextsongid"),
            elapsed: record.parse("elapsed"),
            duration: record.parse("duration"),
            bitrate: record.parse("bitrate"),
            audio: record.text("audio"),
            error: record.text("error"),
        }
    }
}
