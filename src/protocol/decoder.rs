//! Record Decoder
//!
//! Turns raw reply text into structured records.
//!
//! ## Line Format
//! ```text
//! Key: Value
//! ```
//! The first `": "` separates key from value. Lines without it are skipped
//! (logged at trace level as parse anomalies, never raised).
//!
//! ## Record Boundaries
//! The protocol has no separator between list entries. `decode_many` starts a
//! new record whenever the boundary key (`file` by default) reappears while the
//! current record already holds fields.

use super::Record;

/// Boundary key for song listings
pub const FILE_KEY: &str = "file";

/// Decode the whole reply into a single record
///
/// Later duplicate keys overwrite earlier ones. Empty input gives an empty record.
pub fn decode_one(text: &str) -> Record {
    let mut record = Record::new();
    for (key, value) in fields(text) {
        record.insert(key, value);
    }
    record
}

/// Decode a song listing into one record per `file` entry
pub fn decode_many(text: &str) -> Vec<Record> {
    decode_many_by(text, FILE_KEY)
}

/// Decode a listing whose entries start with `boundary`
///
/// Listings such as stored playlists carry no `file` field, so the dispatcher
/// picks the key that recurs once per entry.
pub fn decode_many_by(text: &str, boundary: &str) -> Vec<Record> {
    let boundary = boundary.to_lowercase();
    let mut records = Vec::new();
    let mut current = Record::new();

    for (key, value) in fields(text) {
        if key == boundary && !current.is_empty() {
            records.push(std::mem::take(&mut current));
        }
        current.insert(key, value);
    }

    if !current.is_empty() {
        records.push(current);
    }

    records
}

/// Well-formed `(lower-cased key, value)` pairs in line order
fn fields(text: &str) -> impl Iterator<Item = (String, &str)> {
    text.lines().filter_map(split_line)
}

fn split_line(line: &str) -> Option<(String, &str)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line.split_once(": ") {
        Some((key, value)) if !key.is_empty() => Some((key.to_lowercase(), value)),
        _ => {
            if !line.is_empty() {
                tracing::trace!("Skipping malformed reply line {:?}", line);
            }
            None
        }
    }
}
