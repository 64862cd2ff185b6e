//! Jellyfin connection configuration
//!
//! The configuration is built once at startup and handed to the dispatcher.
//! Missing values are not fatal for the process: every tool call validates
//! the configuration first and reports what is missing.

use std::time::Duration;

use crate::error::{JellyfinError, Result};

pub const ENV_URL: &str = "JELLYFIN_URL";
pub const ENV_API_KEY: &str = "JELLYFIN_API_KEY";
pub const ENV_USER_ID: &str = "JELLYFIN_USER_ID";
pub const ENV_TIMEOUT_SECS: &str = "JELLYFIN_TIMEOUT_SECS";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;
/// Upper bound accepted for the per-request timeout
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Immutable Jellyfin configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JellyfinConfig {
    /// Base URL without trailing slash (e.g. http://jellyfin.local:8096)
    pub base_url: String,
    /// API key, sent as the `api_key` query parameter
    pub api_key: String,
    /// User whose view of the library is queried
    pub user_id: String,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

impl JellyfinConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: api_key.into().trim().to_string(),
            user_id: user_id.into().trim().to_string(),
            timeout: default_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create config from environment variables.
    ///
    /// Absent variables become empty strings and are reported by
    /// [`validate`](Self::validate). A timeout outside `1..=60` is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) if !raw.trim().is_empty() => parse_timeout(&raw)?,
            _ => DEFAULT_TIMEOUT_SECS,
        };
        let var = |name: &str| lookup(name).unwrap_or_default();

        Ok(Self::new(var(ENV_URL), var(ENV_API_KEY), var(ENV_USER_ID))
            .with_timeout(Duration::from_secs(timeout)))
    }

    /// Check that all required values are present.
    ///
    /// Reports the first missing value in the order URL, API key, user id.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (ENV_URL, &self.base_url),
            (ENV_API_KEY, &self.api_key),
            (ENV_USER_ID, &self.user_id),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(JellyfinError::Config(format!("{} not configured", name)));
            }
        }
        Ok(())
    }

    /// Direct playback URL for an audio item
    pub fn audio_stream_url(&self, item_id: &str) -> String {
        format!(
            "{}/Audio/{}/universal?api_key={}",
            self.base_url, item_id, self.api_key
        )
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| (1..=MAX_TIMEOUT_SECS).contains(secs))
        .ok_or_else(|| {
            JellyfinError::Config(format!(
                "{} must be between 1 and {}, got {}",
                ENV_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS,
                raw.trim()
            ))
        })
}
