//! Command definitions
//!
//! A command is a name plus arguments in one of two fixed encodings:
//! - **Tokens**: each argument stringified and space-joined, no escaping
//! - **Formatted**: a single pre-built argument string, typically holding a
//!   value wrapped by [`quote`]
//!
//! The encoding is chosen per command by the dispatcher, never guessed.

use crate::error::{MpdError, Result};

/// Argument encoding selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `command arg1 arg2`
    Tokens,
    /// `command "escaped arg"`
    Quoted,
}

/// Command arguments
#[derive(Debug, Clone, PartialEq, Eq)]
enum Args {
    None,
    Tokens(Vec<String>),
    Formatted(String),
}

/// A protocol command ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    args: Args,
}

impl Command {
    /// Command without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Args::None,
        }
    }

    /// Command with token arguments
    pub fn with_tokens<I, T>(name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self {
            name: name.into(),
            args: Args::Tokens(tokens.into_iter().map(|t| t.to_string()).collect()),
        }
    }

    /// Command with a pre-formatted argument string
    pub fn with_formatted(name: impl Into<String>, formatted: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Args::Formatted(formatted.into()),
        }
    }

    /// Render the request line (without the trailing newline)
    pub fn to_line(&self) -> String {
        match &self.args {
            Args::None => self.name.clone(),
            Args::Tokens(tokens) if tokens.is_empty() => self.name.clone(),
            Args::Tokens(tokens) => format!("{} {}", self.name, tokens.join(" ")),
            Args::Formatted(formatted) if formatted.is_empty() => self.name.clone(),
            Args::Formatted(formatted) => format!("{} {}", self.name, formatted),
        }
    }

    /// Render the request line, refusing anything that would break framing
    pub fn encode(&self) -> Result<String> {
        let line = self.to_line();
        if line.contains(['\n', '\r']) {
            return Err(MpdError::InvalidArgument(format!(
                "Command '{}' contains a line break",
                self.name
            )));
        }
        Ok(line)
    }
}

/// Wrap a value in double quotes, backslash-escaping `"` and `\`
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
