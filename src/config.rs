//! Configuration for mpdwire
//!
//! Centralized session configuration with sensible defaults. The library never
//! reads the environment; callers hand a finished `Config` to the session.

use std::time::Duration;

/// Default daemon port
pub const DEFAULT_PORT: u16 = 6600;

/// Session configuration for one daemon endpoint
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Daemon host name or address
    pub host: String,

    /// Daemon TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Timeouts (milliseconds, 0 = no timeout)
    // -------------------------------------------------------------------------
    /// Connect timeout
    pub connect_timeout_ms: u64,

    /// Reply read timeout. Expiry is fatal for the whole session.
    pub read_timeout_ms: u64,

    /// Request write timeout
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Recovery
    // -------------------------------------------------------------------------
    /// Reopen the connection on the next command after a transport loss.
    /// An explicit `disconnect` always cancels this.
    pub reconnect_on_loss: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            reconnect_on_loss: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` form of the endpoint, used for address resolution and logs
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the daemon host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the daemon port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Enable or disable reconnecting after a transport loss
    pub fn reconnect_on_loss(mut self, enabled: bool) -> Self {
        self.config.reconnect_on_loss = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
