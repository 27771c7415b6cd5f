//! Environment-sourced configuration.
//!
//! Loaded once at startup and passed by reference into each component; no
//! global state.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Demo gateway endpoint used when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://demo.campay.net/api";

/// Wait between consecutive status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Status checks issued before giving up on a pending transaction.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 40;

/// Per-call HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Automatic retries for transport failures on a single call.
pub const DEFAULT_TRANSPORT_RETRIES: u32 = 2;

/// Fixed wait between transport retries.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gateway base URL, without a trailing slash requirement.
    pub base_url: String,
    /// Credential sent as `Authorization: Token <api_key>`.
    pub api_key: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub request_timeout: Duration,
    pub transport_retries: u32,
    pub retry_backoff: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `API_KEY` is required and has no default; a missing or empty value
    /// is a fatal startup error. `BASE_URL` falls back to the demo
    /// gateway endpoint.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base_url = env::var("BASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url,
            api_key,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            transport_retries: DEFAULT_TRANSPORT_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }
}
