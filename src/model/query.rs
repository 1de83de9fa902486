//! Search queries
//!
//! Free-text queries often arrive decorated for display, e.g.
//! `"Artist - Title (Album)"`. Normalization derives the bare title without
//! touching the raw query.

use std::fmt;
use std::str::FromStr;

use crate::error::MpdError;

/// Searchable song attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Artist,
    Album,
    Title,
    Genre,
    Any,
}

impl FieldType {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Artist => "artist",
            FieldType::Album => "album",
            FieldType::Title => "title",
            FieldType::Genre => "genre",
            FieldType::Any => "any",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = MpdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "artist" => Ok(FieldType::Artist),
            "album" => Ok(FieldType::Album),
            "title" => Ok(FieldType::Title),
            "genre" => Ok(FieldType::Genre),
            "any" => Ok(FieldType::Any),
            other => Err(MpdError::InvalidArgument(format!(
                "Unknown field type '{}'",
                other
            ))),
        }
    }
}

/// A field type plus the raw, caller-supplied query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub field: FieldType,
    pub raw: String,
}

impl SearchQuery {
    pub fn new(field: FieldType, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }

    /// Effective query text
    ///
    /// `<left> - <right> (<tail>` becomes `<right>` trimmed; anything else is
    /// returned unchanged.
    pub fn normalized(&self) -> String {
        decorated_title(&self.raw)
            .map(str::to_string)
            .unwrap_or_else(|| self.raw.clone())
    }

    /// Whether normalization changed the query
    pub fn is_decorated(&self) -> bool {
        self.normalized() != self.raw
    }

    /// Raw query up to the first `(`, trimmed
    pub fn before_parenthesis(&self) -> Option<&str> {
        self.raw.split_once('(').map(|(head, _)| head.trim())
    }
}

/// `<right>` of `<left> - <right> (<tail>`, if the query has that shape
///
/// The parenthesis must follow a space, so `"AC - DC(live)"` is left alone.
fn decorated_title(raw: &str) -> Option<&str> {
    let (left, rest) = raw.split_once(" - ")?;
    let (right, _tail) = rest.split_once(" (")?;
    let right = right.trim();

    (!left.trim().is_empty() && !right.is_empty()).then_some(right)
}
