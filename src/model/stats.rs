//! Stats entity

use crate::protocol::Record;

/// Database and daemon statistics (durations in seconds)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub artists: Option<u64>,
    pub albums: Option<u64>,
    pub songs: Option<u64>,
    pub uptime: Option<u64>,
    pub db_playtime: Option<u64>,
    pub playtime: Option<u64>,
    /// Unix epoch of the last database update
    pub db_update: Option<u64>,
}

impl Stats {
    pub fn from_record(record: &Record) -> Self {
        Self {
            artists: record.parse("artists"),
            albums: record.parse("albums"),
            songs: record.parse("songs"),
            uptime: record.parse("uptime"),
            db_playtime: record.parse("db_playtime"),
            playtime: record.parse("playtime"),
            db_update: record.parse("db_update"),
        }
    }
}
