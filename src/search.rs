//! Search Resolver
//!
//! Maximizes match yield for free-text queries with a fixed, ordered cascade
//! of strategies. The first non-empty result wins.
//!
//! ## Cascade
//! ```text
//! 1. normalize      "Artist - Title (Album)"  →  "Title"
//! 2. primary        search <field> "<normalized>"        (quoted)
//! 3. decoration     search title "<raw before '('>"      (title only, decorated, has '(')
//! 4. encoding       search <field> <normalized>          (tokens)
//! 5. broaden        whole cascade again with field = any (only if 2..4 all rejected)
//! 6. exhausted      empty list
//! ```
//!
//! Only a command the daemon rejected moves on to the next strategy. Any other
//! error (lost connection, invalid argument) stops the cascade immediately.

use crate::client::Client;
use crate::error::{MpdError, Result};
use crate::model::{FieldType, SearchQuery, Song};
use crate::protocol::Encoding;

/// Named cascade step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Primary,
    TitleDecoration,
    EncodingFallback,
}

/// One planned search command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub strategy: Strategy,
    pub field: FieldType,
    pub text: String,
    pub encoding: Encoding,
}

/// Build the ordered attempts for a query (steps 1 to 4)
pub fn plan(query: &SearchQuery) -> Vec<Attempt> {
    let effective = query.normalized();
    let mut attempts = Vec::with_capacity(3);

    attempts.push(Attempt {
        strategy: Strategy::Primary,
        field: query.field,
        text: effective.clone(),
        encoding: Encoding::Quoted,
    });

    if query.field == FieldType::Title && query.is_decorated() {
        if let Some(head) = query.before_parenthesis() {
            attempts.push(Attempt {
                strategy: Strategy::TitleDecoration,
                field: query.field,
                text: head.to_string(),
                encoding: Encoding::Quoted,
            });
        }
    }

    attempts.push(Attempt {
        strategy: Strategy::EncodingFallback,
        field: query.field,
        text: effective,
        encoding: Encoding::Tokens,
    });

    attempts
}

/// Runs the cascade against a dispatcher
pub struct SearchResolver<'a> {
    client: &'a Client,
}

impl<'a> SearchResolver<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Resolve a query to songs; an empty list means no match
    pub fn resolve(&self, query: &SearchQuery) -> Result<Vec<Song>> {
        match self.cascade(query)? {
            Outcome::Found(songs) => Ok(songs),
            Outcome::Empty => Ok(Vec::new()),
            Outcome::AllRejected(last) if query.field != FieldType::Any => {
                tracing::debug!(
                    "Every {} search for {:?} was rejected ({}), broadening to any",
                    query.field,
                    query.raw,
                    last
                );
                let broadened = SearchQuery::new(FieldType::Any, query.raw.clone());
                match self.cascade(&broadened)? {
                    Outcome::Found(songs) => Ok(songs),
                    Outcome::Empty | Outcome::AllRejected(_) => Ok(Vec::new()),
                }
            }
            Outcome::AllRejected(_) => Ok(Vec::new()),
        }
    }

    /// Steps 1 to 4, short-circuiting on the first non-empty result
    fn cascade(&self, query: &SearchQuery) -> Result<Outcome> {
        let mut saw_empty = false;
        let mut last_rejection = None;

        for attempt in plan(query) {
            match self
                .client
                .search_with(attempt.field, &attempt.text, attempt.encoding)
            {
                Ok(songs) if !songs.is_empty() => {
                    tracing::debug!(
                        "{:?} search matched {} songs for {:?}",
                        attempt.strategy,
                        songs.len(),
                        attempt.text
                    );
                    return Ok(Outcome::Found(songs));
                }
                Ok(_) => {
                    tracing::debug!(
                        "{:?} search found nothing for {:?}",
                        attempt.strategy,
                        attempt.text
                    );
                    saw_empty = true;
                }
                Err(rejected @ MpdError::CommandRejected { .. }) => {
                    tracing::debug!(
                        "{:?} search rejected for {:?}: {}",
                        attempt.strategy,
                        attempt.text,
                        rejected
                    );
                    last_rejection = Some(rejected);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(match last_rejection {
            Some(e) if !saw_empty => Outcome::AllRejected(e),
            _ => Outcome::Empty,
        })
    }
}

/// Result of one pass through steps 1 to 4
enum Outcome {
    Found(Vec<Song>),
    /// At least one attempt came back empty and none matched
    Empty,
    /// Every attempt was rejected; carries the last rejection
    AllRejected(MpdError),
}
