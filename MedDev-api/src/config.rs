//! Runtime configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use meddev_domain::services::DEFAULT_FETCH_DELAY;

use crate::api::session_store::{DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS};

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("RECORDS_DELAY_MS must be a whole number of milliseconds, got {0:?}")]
    InvalidDelay(String),

    #[error("MAX_SESSIONS must be a positive number, got {0:?}")]
    InvalidMaxSessions(String),

    #[error("SESSION_IDLE_SECS must be a positive number of seconds, got {0:?}")]
    InvalidIdleTimeout(String),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to listen on (`PORT`, default 3000)
    pub port: u16,
    /// Directory holding the shared site fragments (`SITE_DIR`, default `site`)
    pub site_dir: PathBuf,
    /// Simulated latency of the patient records fetch (`RECORDS_DELAY_MS`, default 1000)
    pub records_delay: Duration,
    /// Deployment label reported by the health check (`APP_ENV`, default `development`)
    pub environment: String,
    /// Upper bound on live visitor sessions (`MAX_SESSIONS`, default 10000)
    pub max_sessions: usize,
    /// Time an untouched session survives (`SESSION_IDLE_SECS`, default 1800)
    pub session_idle_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            site_dir: PathBuf::from("site"),
            records_delay: DEFAULT_FETCH_DELAY,
            environment: "development".to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let records_delay = match lookup("RECORDS_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDelay(raw))?,
            None => defaults.records_delay,
        };

        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxSessions(raw)),
            },
            None => defaults.max_sessions,
        };

        let session_idle_timeout = match lookup("SESSION_IDLE_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidIdleTimeout(raw)),
            },
            None => defaults.session_idle_timeout,
        };

        Ok(Self {
            port,
            site_dir: lookup("SITE_DIR").map(PathBuf::from).unwrap_or(defaults.site_dir),
            records_delay,
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
            max_sessions,
            session_idle_timeout,
        })
    }
}
