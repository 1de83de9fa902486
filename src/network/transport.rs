//! Transport
//!
//! The byte-level channel underneath a session. A transport sends one request
//! line and reads the reply up to its terminator; it knows nothing about
//! queueing, which the session owns.

use std::borrow::Cow;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{MpdError, Result};
use crate::protocol::{classify_line, parse_greeting, ReplyLine};

/// A connected request/reply channel
pub trait Transport: Send {
    /// Send one request line and return the reply body
    ///
    /// The body holds every line before the `OK` terminator, each ending in
    /// `\n`. An `ACK` terminator yields `MpdError::CommandRejected`; any other
    /// error means the channel is unusable.
    fn exchange(&mut self, line: &str) -> Result<String>;

    /// Close the channel
    fn close(&mut self) -> Result<()>;

    /// Daemon version announced in the greeting
    fn server_version(&self) -> Option<&str> {
        None
    }
}

/// Opens transports for a session
pub trait Connector: Send + Sync {
    fn connect(&self, config: &Config) -> Result<Box<dyn Transport>>;
}

/// Connector for plain TCP endpoints
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    fn connect(&self, config: &Config) -> Result<Box<dyn Transport>> {
        Ok(Box::new(TcpTransport::connect(config)?))
    }
}

/// Line transport over a TCP stream
pub struct TcpTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Daemon version from the greeting
    version: String,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect and consume the greeting
    ///
    /// Tries every resolved address in turn and configures timeouts.
    pub fn connect(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint();
        let mut last_error = None;
        let mut stream = None;

        for addr in endpoint.to_socket_addrs()? {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }

        let stream = match (stream, last_error) {
            (Some(s), _) => s,
            (None, Some(e)) => return Err(e.into()),
            (None, None) => {
                return Err(MpdError::Config(format!(
                    "No addresses resolved for {}",
                    endpoint
                )))
            }
        };

        Self::from_stream(stream, config)
    }

    /// Wrap an already-connected stream and consume the greeting
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Requests are tiny; don't let Nagle hold them back
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        let read_stream = stream.try_clone()?;
        let mut reader = BufReader::new(read_stream);

        let mut buf = Vec::new();
        let Some(greeting) = read_reply_line(&mut reader, &mut buf)? else {
            return Err(MpdError::ConnectionLost(format!(
                "{} closed the connection before greeting",
                peer_addr
            )));
        };
        let version = parse_greeting(&greeting)?;

        tracing::debug!("Connected to {} (protocol {})", peer_addr, version);

        Ok(Self {
            reader,
            writer: BufWriter::new(stream),
            version,
            peer_addr,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for TcpTransport {
    fn exchange(&mut self, line: &str) -> Result<String> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        let mut body = String::new();
        let mut buf = Vec::new();
        loop {
            let Some(line) = read_reply_line(&mut self.reader, &mut buf)? else {
                return Err(MpdError::ConnectionLost(format!(
                    "{} closed the connection mid-reply",
                    self.peer_addr
                )));
            };

            match classify_line(&line) {
                ReplyLine::Ok => return Ok(body),
                ReplyLine::Ack(error) => return Err(error),
                ReplyLine::Data(data) => {
                    body.push_str(data);
                    body.push('\n');
                }
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        // The daemon drops the connection on `close` without replying
        self.writer.write_all(b"close\n")?;
        self.writer.flush()?;
        self.writer.get_ref().shutdown(Shutdown::Both)?;
        Ok(())
    }

    fn server_version(&self) -> Option<&str> {
        Some(&self.version)
    }
}

/// Read one line without its `\n`; `None` at end of stream
///
/// Invalid UTF-8 is replaced rather than raised, so one badly tagged file
/// cannot take the connection down.
fn read_reply_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }

    let line = match String::from_utf8_lossy(buf) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            tracing::trace!("Replaced invalid UTF-8 in reply line {:?}", line);
            line
        }
    };
    Ok(Some(line))
}
