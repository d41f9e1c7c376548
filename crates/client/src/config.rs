//! Client configuration.

use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::types::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    /// Raise a timeout event after this long without inbound data.
    pub idle_timeout: Option<Duration>,
    /// Read buffer growth per socket read.
    pub read_chunk: usize,
    pub log_path: Option<String>,
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_millis(5000),
            idle_timeout: None,
            read_chunk: 4096,
            log_path: None,
            log_format: LogFormat::Compact,
        }
    }
}

impl ClientConfig {
    /// Read `SPECTATOR_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("SPECTATOR_HOST").unwrap_or(defaults.host);
        let port = env::var("SPECTATOR_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let connect_timeout = env::var("SPECTATOR_CONNECT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.connect_timeout);

        let idle_timeout = env::var("SPECTATOR_IDLE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        let read_chunk = env::var("SPECTATOR_READ_CHUNK")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.read_chunk)
            .max(64);

        let log_path = env::var("SPECTATOR_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let log_format = match env::var("SPECTATOR_LOG_FORMAT").as_deref() {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Self {
            host,
            port,
            connect_timeout,
            idle_timeout,
            read_chunk,
            log_path,
            log_format,
        }
    }

    /// Resolve `host:port`, taking the first address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid server address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("{}:{} resolved to no addresses", self.host, self.port))
    }
}
