//! Network Module
//!
//! The single logical connection to the daemon.
//!
//! ## Architecture
//! - One worker thread per live connection owns the transport
//! - Callers enqueue commands on a FIFO channel and block for their reply
//! - Exactly one command in flight; no pipelining

mod session;
mod transport;

pub use session::{ConnectionState, Session};
pub use transport::{Connector, TcpConnector, TcpTransport, Transport};
