//! Error types for mpdwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MpdError
pub type Result<T> = std::result::Result<T, MpdError>;

/// Unified error type for mpdwire operations
#[derive(Debug, Error)]
pub enum MpdError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Not connected to the daemon")]
    NotConnected,

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    // -------------------------------------------------------------------------
    // Daemon Errors
    // -------------------------------------------------------------------------
    /// Explicit `ACK [code@index] {command} message` reply
    #[error("Command '{command}' rejected (code {code}, index {index}): {message}")]
    CommandRejected {
        code: u32,
        index: u32,
        command: String,
        message: String,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
