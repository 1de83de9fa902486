//! Connection Session
//!
//! Owns the one logical channel to the daemon and serializes every command
//! over it.
//!
//! ## Concurrency Model
//!
//! ```text
//!  caller A ─┐                       ┌──────────────┐
//!  caller B ─┼─► FIFO job channel ─► │ worker thread│ ─► Transport ─► daemon
//!  caller C ─┘   (one in flight)     └──────────────┘
//! ```
//!
//! - Jobs are enqueued while holding the lifecycle lock, so queue order is
//!   the order in which callers reached the session
//! - Each caller blocks on its own reply channel
//! - A transport failure fails the in-flight job and every queued job with
//!   `ConnectionLost`; the link is then torn down
//! - After a loss the next `execute` reopens the link, unless
//!   `Config::reconnect_on_loss` is off or `disconnect` ran in between
//! - `connect`/`disconnect` hold the lifecycle lock for their whole duration,
//!   which makes them mutually exclusive

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{MpdError, Result};
use crate::protocol::Command;

use super::transport::{Connector, TcpConnector, Transport};

/// Lifecycle of the session's connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Unit of work for the worker thread
enum Job {
    Run {
        line: String,
        reply: Sender<Result<String>>,
    },
    /// Close the transport once everything queued ahead has run
    Close,
}

/// A live connection: the worker and the way to reach it
struct Link {
    jobs: Sender<Job>,
    worker: JoinHandle<()>,
    /// Set by the worker when the transport fails
    lost: Arc<AtomicBool>,
    version: Option<String>,
}

struct Inner {
    state: ConnectionState,
    link: Option<Link>,
    /// Set when a lost link was reaped; cleared by connect/disconnect
    reconnect_pending: bool,
}

/// Serialized session with one daemon endpoint
pub struct Session {
    config: Config,
    connector: Arc<dyn Connector>,
    inner: Mutex<Inner>,
}

impl Session {
    /// Create a disconnected session for a TCP endpoint
    pub fn new(config: Config) -> Self {
        Self::with_connector(config, Arc::new(TcpConnector))
    }

    /// Create a disconnected session using a custom connector
    pub fn with_connector(config: Config, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            inner: Mutex::new(Inner {
                state: ConnectionState::Disconnected,
                link: None,
                reconnect_pending: false,
            }),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the connection
    ///
    /// No-op when already connected. On failure the session stays
    /// disconnected and the error is returned.
    pub fn connect(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        reap_lost(&mut inner);

        if inner.link.is_some() {
            tracing::debug!("Already connected to {}", self.config.endpoint());
            return Ok(());
        }

        self.open_link(&mut inner)
    }

    /// Dial and start the worker; the caller holds the lifecycle lock
    fn open_link(&self, inner: &mut Inner) -> Result<()> {
        inner.state = ConnectionState::Connecting;
        tracing::info!("Connecting to {}", self.config.endpoint());

        let transport = match self.connector.connect(&self.config) {
            Ok(t) => t,
            Err(e) => {
                inner.state = ConnectionState::Disconnected;
                tracing::warn!("Failed to connect to {}: {}", self.config.endpoint(), e);
                return Err(e);
            }
        };

        let version = transport.server_version().map(str::to_string);
        let (jobs, queue) = channel::unbounded();
        let lost = Arc::new(AtomicBool::new(false));
        let worker_lost = Arc::clone(&lost);
        let endpoint = self.config.endpoint();

        let worker = match thread::Builder::new()
            .name("mpdwire-session".to_string())
            .spawn(move || run_worker(transport, queue, worker_lost, endpoint))
        {
            Ok(handle) => handle,
            Err(e) => {
                inner.state = ConnectionState::Disconnected;
                return Err(e.into());
            }
        };

        inner.link = Some(Link {
            jobs,
            worker,
            lost,
            version,
        });
        inner.state = ConnectionState::Connected;
        inner.reconnect_pending = false;
        Ok(())
    }

    /// Close the connection
    ///
    /// Idempotent and infallible: commands queued ahead of the close still run,
    /// and close failures are only logged.
    pub fn disconnect(&self) {
        let mut inner = self.inner.lock();
        inner.reconnect_pending = false;
        let Some(link) = inner.link.take() else {
            return;
        };

        // Worker may already be gone after a transport loss
        let _ = link.jobs.send(Job::Close);
        drop(link.jobs);

        if link.worker.join().is_err() {
            tracing::warn!("Session worker for {} panicked", self.config.endpoint());
        }

        inner.state = ConnectionState::Disconnected;
        tracing::info!("Disconnected from {}", self.config.endpoint());
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Send a command and wait for its reply body
    ///
    /// Fails with `NotConnected` when there is no live connection and with
    /// `ConnectionLost` when the transport fails before the reply arrives.
    /// A session that lost its transport reconnects here first, if allowed.
    pub fn execute(&self, command: &Command) -> Result<String> {
        let line = command.encode()?;
        let (reply, response) = channel::bounded(1);

        {
            let mut inner = self.inner.lock();
            reap_lost(&mut inner);

            if inner.link.is_none() && inner.reconnect_pending && self.config.reconnect_on_loss {
                tracing::info!("Reconnecting to {} after connection loss", self.config.endpoint());
                self.open_link(&mut inner)?;
            }

            let link = inner.link.as_ref().ok_or(MpdError::NotConnected)?;
            tracing::debug!("-> {}", line);
            link.jobs
                .send(Job::Run { line, reply })
                .map_err(|_| MpdError::ConnectionLost("session worker has stopped".into()))?;
        }

        response.recv().map_err(|_| {
            MpdError::ConnectionLost("session worker dropped the request".to_string())
        })?
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        let mut inner = self.inner.lock();
        reap_lost(&mut inner);
        inner.state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Daemon version from the greeting of the live connection
    pub fn server_version(&self) -> Option<String> {
        let inner = self.inner.lock();
        inner.link.as_ref().and_then(|link| link.version.clone())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Tear down a link whose transport has failed
fn reap_lost(inner: &mut Inner) {
    let is_lost = inner
        .link
        .as_ref()
        .is_some_and(|link| link.lost.load(Ordering::SeqCst));

    if !is_lost {
        return;
    }

    if let Some(link) = inner.link.take() {
        drop(link.jobs);
        if link.worker.join().is_err() {
            tracing::warn!("Session worker panicked after connection loss");
        }
        inner.reconnect_pending = true;
    }
    inner.state = ConnectionState::Disconnected;
}

/// Worker loop: one job at a time, in queue order
fn run_worker(
    mut transport: Box<dyn Transport>,
    queue: Receiver<Job>,
    lost: Arc<AtomicBool>,
    endpoint: String,
) {
    while let Ok(job) = queue.recv() {
        let (line, reply) = match job {
            Job::Run { line, reply } => (line, reply),
            Job::Close => break,
        };

        match transport.exchange(&line) {
            Ok(body) => {
                let _ = reply.send(Ok(body));
            }
            Err(rejected @ MpdError::CommandRejected { .. }) => {
                tracing::debug!("<- {}", rejected);
                let _ = reply.send(Err(rejected));
            }
            Err(e) => {
                let reason = match e {
                    MpdError::ConnectionLost(reason) => reason,
                    other => other.to_string(),
                };
                tracing::warn!("Connection to {} lost: {}", endpoint, reason);
                lost.store(true, Ordering::SeqCst);

                let _ = reply.send(Err(MpdError::ConnectionLost(reason.clone())));
                for job in queue.try_iter() {
                    if let Job::Run { reply, .. } = job {
                        let _ = reply.send(Err(MpdError::ConnectionLost(reason.clone())));
                    }
                }
                return;
            }
        }
    }

    if let Err(e) = transport.close() {
        tracing::warn!("Error closing connection to {}: {}", endpoint, e);
    }
}
