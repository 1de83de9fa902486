//! Protocol Module
//!
//! Defines the line protocol spoken with the daemon.
//!
//! ## Request Format
//! ```text
//! command arg1 arg2 ...\n
//! command "escaped \"arg\""\n
//! ```
//!
//! ## Reply Format
//! ```text
//! ┌──────────────────────────────┐
//! │ Key: Value                   │  zero or more body lines
//! │ Key: Value                   │
//! ├──────────────────────────────┤
//! │ OK | ACK [code@idx] {cmd} msg│  terminator
//! └──────────────────────────────┘
//! ```

mod command;
mod decoder;
mod record;
mod response;

pub use command::{quote, Command, Encoding};
pub use decoder::{decode_many, decode_many_by, decode_one, FILE_KEY};
pub use record::Record;
pub use response::{
    classify_line, parse_ack, parse_greeting, ReplyLine, ACK_PREFIX, GREETING_PREFIX, OK,
};
