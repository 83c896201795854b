//! Connection settings for the alert feed.

use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::constants::{
    ALERTS_PATH, ALLOWED_HISTORY_LIMITS, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HEALTH_PATH,
    POLL_INTERVAL_MS, WS_ALERTS_PATH,
};

/// Errors raised while building feed settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The base URL uses a scheme other than http/https.
    #[error("Unsupported scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

/// Connection settings for one backend.
///
/// Owns the validated base URL and derives the snapshot, purge, and
/// push-channel URLs from it. The push URL swaps the scheme to
/// ws/wss and appends the channel path, matching how the backend
/// exposes `/ws/alerts` next to `/alerts`.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    base_url: Url,
}

impl Default for FeedSettings {
    fn default() -> Self {
        // DEFAULT_BASE_URL is a compile-time constant known to parse.
        Self::new(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL is valid"))
    }
}

impl FeedSettings {
    /// Create settings from a base URL string.
    ///
    /// Trailing slashes are stripped so endpoint paths concatenate
    /// cleanly. Only http and https schemes are accepted.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        match base_url.scheme() {
            "http" | "https" => Ok(Self { base_url }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// The validated base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the snapshot/purge endpoint (`GET`/`DELETE /alerts`).
    pub fn alerts_url(&self) -> Url {
        self.join(ALERTS_PATH)
    }

    /// URL of the health probe endpoint.
    pub fn health_url(&self) -> Url {
        self.join(HEALTH_PATH)
    }

    /// URL of the push channel (`/ws/alerts`), with the scheme swapped
    /// to ws or wss to match the base URL's security level.
    pub fn ws_url(&self) -> Url {
        let mut url = self.join(WS_ALERTS_PATH);
        let scheme = if self.base_url.scheme() == "https" {
            "wss"
        } else {
            "ws"
        };
        // Both ws and wss are valid schemes for a parsed http(s) URL.
        let _ = url.set_scheme(scheme);
        url
    }

    /// Default HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// Interval between fallback snapshot polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(POLL_INTERVAL_MS)
    }

    /// Whether `limit` is one of the history sizes the UI offers.
    pub fn is_allowed_limit(limit: usize) -> bool {
        ALLOWED_HISTORY_LIMITS.contains(&limit)
    }

    fn join(&self, path: &str) -> Url {
        // The base URL is validated at construction; joining a fixed
        // absolute path cannot fail.
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }
}
