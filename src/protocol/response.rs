//! Reply framing
//!
//! Every reply ends with a terminator line:
//! - `OK` on success, preceded by zero or more `Key: Value` lines
//! - `ACK [code@index] {command} message` on failure
//!
//! A fresh connection starts with the greeting `OK MPD <version>`.

use crate::error::{MpdError, Result};

/// Success terminator
pub const OK: &str = "OK";

/// Failure terminator prefix
pub const ACK_PREFIX: &str = "ACK ";

/// Greeting prefix sent by the daemon on connect
pub const GREETING_PREFIX: &str = "OK MPD ";

/// Classification of one reply line
#[derive(Debug)]
pub enum ReplyLine<'a> {
    /// Success terminator
    Ok,
    /// Failure terminator, already parsed
    Ack(MpdError),
    /// Body line
    Data(&'a str),
}

/// Classify one reply line (trailing `\r` tolerated)
pub fn classify_line(line: &str) -> ReplyLine<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line == OK {
        ReplyLine::Ok
    } else if let Some(rest) = line.strip_prefix(ACK_PREFIX) {
        ReplyLine::Ack(parse_ack(rest))
    } else {
        ReplyLine::Data(line)
    }
}

/// Parse the part of an ACK line after `"ACK "`
///
/// Format: `[code@index] {command} message`. Missing pieces default to zero or
/// empty; an ACK is always a rejection even when it is oddly shaped.
pub fn parse_ack(rest: &str) -> MpdError {
    let mut code = 0;
    let mut index = 0;
    let mut command = String::new();
    let mut rest = rest.trim_start();

    if let Some(inner) = rest.strip_prefix('[') {
        if let Some((bracket, tail)) = inner.split_once(']') {
            if let Some((c, i)) = bracket.split_once('@') {
                code = c.trim().parse().unwrap_or(0);
                index = i.trim().parse().unwrap_or(0);
            }
            rest = tail.trim_start();
        }
    }

    if let Some(inner) = rest.strip_prefix('{') {
        if let Some((name, tail)) = inner.split_once('}') {
            command = name.to_string();
            rest = tail.trim_start();
        }
    }

    MpdError::CommandRejected {
        code,
        index,
        command,
        message: rest.to_string(),
    }
}

/// Extract the daemon version from the greeting line
pub fn parse_greeting(line: &str) -> Result<String> {
    let line = line.trim_end_matches(['\r', '\n']);
    line.strip_prefix(GREETING_PREFIX)
        .map(|version| version.trim().to_string())
        .ok_or_else(|| MpdError::Protocol(format!("Unexpected greeting: {:?}", line)))
}
