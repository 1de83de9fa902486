//! Song entity

use crate::protocol::Record;

/// A song as reported by queue, database and search listings
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// File identifier relative to the music directory (always present)
    pub file: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub track: Option<String>,
    /// Legacy whole-second duration string
    pub time: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Position in the queue
    pub pos: Option<u32>,
    /// Queue id
    pub id: Option<u32>,
}

impl Song {
    /// Map a record to a song
    ///
    /// Returns `None` when the record has no non-empty `file` field, which
    /// means it is not a song record at all (e.g. a directory entry).
    pub fn from_record(record: &Record) -> Option<Self> {
        let file = record.get("file").filter(|f| !f.is_empty())?;

        Some(Self {
            file: file.to_string(),
            artist: record.text("artist"),
            album: record.text("album"),
            title: record.text("title"),
            genre: record.text("genre"),
            track: record.text("track"),
            time: record.text("time"),
            duration: record.parse("duration"),
            pos: record.parse("pos"),
            id: record.parse("id"),
        })
    }

    /// Map every song record, dropping the rest
    pub fn from_records(records: &[Record]) -> Vec<Self> {
        records.iter().filter_map(Song::from_record).collect()
    }
}
