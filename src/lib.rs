//! # mpdwire
//!
//! Client-side protocol layer for the MPD line protocol:
//! - Record decoding of `Key: Value` replies
//! - Typed entities (songs, status, stats, stored playlists)
//! - A serialized session: one connection, one command in flight
//! - A deterministic fallback cascade for free-text search
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Callers                               │
//! │                 (tools, CLI, resources)                      │
//! └──────────────┬───────────────────────────┬──────────────────┘
//!                │                           │
//!                ▼                           ▼
//!        ┌───────────────┐           ┌───────────────┐
//!        │ SearchResolver│──────────►│    Client     │
//!        │  (cascade)    │           │ (dispatcher)  │
//!        └───────────────┘           └───────┬───────┘
//!                                            │
//!                                            ▼
//!                                    ┌───────────────┐
//!                                    │    Session    │
//!                                    │ (FIFO worker) │
//!                                    └───────┬───────┘
//!                                            │
//!                                            ▼
//!                                         daemon
//!
//!   reply text ─► protocol::decode_* ─► Record ─► model::{Song, Status, ..}
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod model;
pub mod network;
pub mod client;
pub mod search;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MpdError, Result};
pub use config::Config;
pub use client::Client;
pub use model::{FieldType, PlaybackState, PlaylistEntry, SearchQuery, Song, Stats, Status};
pub use network::Session;
pub use search::SearchResolver;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mpdwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
