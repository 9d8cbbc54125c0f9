//! Runtime settings read from the environment
//!
//! Every value has a default; malformed numbers fall back to it. Only a
//! malformed bind address is reported as an error.

use std::net::SocketAddr;
use std::time::Duration;

use chrono_tz::Tz;
use tracing::warn;

use crate::client::ClientConfig;
use crate::error::{MediathekError, Result};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const MIN_CACHE_TTL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 10.0;
pub const DEFAULT_HEAD_TIMEOUT_SECS: f64 = 5.0;
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Settings shared by the scraper and the HTTP server
#[derive(Debug, Clone)]
pub struct Settings {
    /// `CACHE_TTL_SECONDS`, never below 30s
    pub cache_ttl: Duration,
    /// `REQUEST_TIMEOUT_SECONDS`
    pub request_timeout: Duration,
    /// `HEAD_TIMEOUT_SECONDS`
    pub head_timeout: Duration,
    /// `LOCAL_TZ`, used to decide what "today" is
    pub timezone: Tz,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Read settings from process environment variables
    ///
    /// # Errors
    /// `InvalidConfig` if `BIND_ADDR` is set but not a socket address
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| MediathekError::InvalidConfig(format!("BIND_ADDR {bind_raw:?}: {e}")))?;

        Ok(Self {
            cache_ttl: parse_cache_ttl(lookup("CACHE_TTL_SECONDS").as_deref()),
            request_timeout: parse_seconds(
                lookup("REQUEST_TIMEOUT_SECONDS").as_deref(),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            head_timeout: parse_seconds(
                lookup("HEAD_TIMEOUT_SECONDS").as_deref(),
                DEFAULT_HEAD_TIMEOUT_SECS,
            ),
            timezone: resolve_timezone(lookup("LOCAL_TZ").as_deref().unwrap_or(DEFAULT_TIMEZONE)),
            bind_addr,
        })
    }

    /// HTTP client configuration carrying these timeouts
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: self.request_timeout,
            head_timeout: self.head_timeout,
            ..ClientConfig::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT_SECS),
            head_timeout: Duration::from_secs_f64(DEFAULT_HEAD_TIMEOUT_SECS),
            timezone: chrono_tz::Europe::Berlin,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
        }
    }
}

/// Whole seconds, floored at 30; unparsable values give the default
fn parse_cache_ttl(raw: Option<&str>) -> Duration {
    let secs = match raw.map(|s| s.trim().parse::<i64>()) {
        None => DEFAULT_CACHE_TTL_SECS,
        Some(Ok(value)) => value.max(MIN_CACHE_TTL_SECS as i64) as u64,
        Some(Err(_)) => {
            warn!(value = ?raw, "CACHE_TTL_SECONDS is not an integer, using default");
            DEFAULT_CACHE_TTL_SECS
        }
    };
    Duration::from_secs(secs)
}

/// Fractional seconds; unparsable or non-positive values give the default
fn parse_seconds(raw: Option<&str>, default: f64) -> Duration {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or_else(|| Duration::from_secs_f64(default))
}

/// IANA zone by name, UTC if the name is unknown
pub fn resolve_timezone(name: &str) -> Tz {
    match name.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(zone = name, "unknown LOCAL_TZ, falling back to UTC");
            Tz::UTC
        }
    }
}
