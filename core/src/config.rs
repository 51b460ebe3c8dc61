//! Client configuration.
//!
//! Defaults match what every client gets when nothing is configured: 20
//! second call and read timeouts, up to 64 asynchronous calls in flight and
//! response bodies of at most 256 MiB. `from_env` lets a deployment override
//! them without code changes.

use std::time::Duration;

use crate::error::{ClientError, Result};

pub const CALL_TIMEOUT_ENV: &str = "SIMPLE_CLIENT_CALL_TIMEOUT_SECS";
pub const READ_TIMEOUT_ENV: &str = "SIMPLE_CLIENT_READ_TIMEOUT_SECS";
pub const MAX_IN_FLIGHT_ENV: &str = "SIMPLE_CLIENT_MAX_IN_FLIGHT";
pub const MAX_BODY_SIZE_ENV: &str = "SIMPLE_CLIENT_MAX_BODY_BYTES";

pub const DEFAULT_MAX_BODY_SIZE: u64 = 256 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on a whole call, connect through last body byte.
    pub call_timeout: Duration,
    /// Upper bound on waiting for the response head and for the body.
    pub read_timeout: Duration,
    /// Worker threads available to asynchronous calls.
    pub max_in_flight: usize,
    /// Largest response body read, in bytes. A 2xx body over the limit fails
    /// the call as a transport error; a non-2xx one is dropped and the status
    /// is reported as usual.
    pub max_body_size: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(20),
            read_timeout: Duration::from_secs(20),
            max_in_flight: 64,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by any of the `SIMPLE_CLIENT_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(secs) = parse_var::<u64>(&lookup, CALL_TIMEOUT_ENV)? {
            config.call_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, READ_TIMEOUT_ENV)? {
            config.read_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = parse_var::<usize>(&lookup, MAX_IN_FLIGHT_ENV)? {
            config.max_in_flight = max;
        }
        if let Some(bytes) = parse_var::<u64>(&lookup, MAX_BODY_SIZE_ENV)? {
            config.max_body_size = bytes;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.call_timeout.is_zero() || self.read_timeout.is_zero() {
            return Err(ClientError::Config("timeouts must be non-zero".to_string()));
        }
        if self.max_in_flight == 0 {
            return Err(ClientError::Config("max_in_flight must be at least 1".to_string()));
        }
        if self.max_body_size == 0 {
            return Err(ClientError::Config("max_body_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{key}={raw:?} is not a valid number"))),
    }
}
