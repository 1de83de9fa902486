//! Shared test helpers
//!
//! A scripted in-memory transport that records every request and answers it
//! through a closure.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use mpdwire::network::{Connector, Session, Transport};
use mpdwire::{Client, Config, MpdError, Result};

/// Reply function: request line in, reply body (or error) out
pub type Handler = dyn Fn(&str) -> Result<String> + Send + Sync;

/// Transport-level observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Request(String),
    Reply(String),
}

/// Shared script state, observable from the test body
#[derive(Clone)]
pub struct Script {
    handler: Arc<Handler>,
    events: Arc<Mutex<Vec<Event>>>,
    connects: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    fail_connect: Arc<AtomicBool>,
    fail_close: Arc<AtomicBool>,
}

impl Script {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            events: Arc::new(Mutex::new(Vec::new())),
            connects: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            fail_connect: Arc::new(AtomicBool::new(false)),
            fail_close: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Script that answers every command with an empty `OK`
    pub fn ok() -> Self {
        Self::new(|_| Ok(String::new()))
    }

    /// Request lines in the order the transport saw them
    pub fn sent(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Request(line) => Some(line.clone()),
                Event::Reply(_) => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    pub fn fail_close(&self, fail: bool) {
        self.fail_close.store(fail, Ordering::SeqCst);
    }

    /// Block until the transport has seen `count` requests
    pub fn wait_for_requests(&self, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while self.sent().len() < count {
            assert!(Instant::now() < deadline, "timed out waiting for requests");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    pub fn connector(&self) -> Arc<dyn Connector> {
        Arc::new(ScriptedConnector {
            script: self.clone(),
        })
    }

    /// Disconnected session over this script
    pub fn session(&self) -> Session {
        Session::with_connector(Config::default(), self.connector())
    }

    /// Connected client over this script
    pub fn client(&self) -> Client {
        let client = Client::new(Arc::new(self.session()));
        client.connect().unwrap();
        client
    }
}

struct ScriptedConnector {
    script: Script,
}

impl Connector for ScriptedConnector {
    fn connect(&self, _config: &Config) -> Result<Box<dyn Transport>> {
        if self.script.fail_connect.load(Ordering::SeqCst) {
            return Err(MpdError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        self.script.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedTransport {
            script: self.script.clone(),
        }))
    }
}

struct ScriptedTransport {
    script: Script,
}

impl Transport for ScriptedTransport {
    fn exchange(&mut self, line: &str) -> Result<String> {
        self.script
            .events
            .lock()
            .unwrap()
            .push(Event::Request(line.to_string()));
        let reply = (self.script.handler)(line);
        self.script
            .events
            .lock()
            .unwrap()
            .push(Event::Reply(line.to_string()));
        reply
    }

    fn close(&mut self) -> Result<()> {
        self.script.closes.fetch_add(1, Ordering::SeqCst);
        if self.script.fail_close.load(Ordering::SeqCst) {
            return Err(MpdError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "broken pipe",
            )));
        }
        Ok(())
    }

    fn server_version(&self) -> Option<&str> {
        Some("0.23.5")
    }
}

// =============================================================================
// Reply Builders
// =============================================================================

/// `ACK [2@0] {command} message` as the transport would surface it
pub fn rejected(command: &str, message: &str) -> MpdError {
    MpdError::CommandRejected {
        code: 2,
        index: 0,
        command: command.to_string(),
        message: message.to_string(),
    }
}

pub fn lost() -> MpdError {
    MpdError::ConnectionLost("socket closed by peer".to_string())
}

/// Reply body for a list of songs given as (file, title) pairs
pub fn song_listing(songs: &[(&str, &str)]) -> String {
    songs
        .iter()
        .map(|(file, title)| format!("file: {}\nTitle: {}\n", file, title))
        .collect()
}
