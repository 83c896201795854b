//! Client facade over the alert backend's HTTP surface.

use std::time::Duration;

use idsfeed_config::constants::DEFAULT_TIMEOUT_SECS;

use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{AlertRecord, HealthStatus, PurgeOutcome};

/// Builder for creating a new [`AlertsClient`].
pub struct AlertsClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
}

impl Default for AlertsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AlertsClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the alert backend.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// Prevents double slashes when concatenating endpoint paths.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    pub fn build(self) -> Result<AlertsClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(AlertsClient { http, base_url })
    }
}

/// Alert backend REST client.
///
/// Cheap to clone is not a goal here; the synchronizer shares one
/// instance behind an `Arc`.
#[derive(Debug)]
pub struct AlertsClient {
    http: reqwest::Client,
    base_url: String,
}

impl AlertsClient {
    /// Create a new client builder.
    pub fn builder() -> AlertsClientBuilder {
        AlertsClientBuilder::new()
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the `limit` most recent alerts, oldest-first.
    pub async fn snapshot(&self, limit: usize) -> Result<Vec<AlertRecord>> {
        endpoints::fetch_alerts(&self.http, &self.base_url, limit).await
    }

    /// Delete all alerts from the backend store.
    pub async fn purge(&self) -> Result<PurgeOutcome> {
        endpoints::purge_alerts(&self.http, &self.base_url).await
    }

    /// Probe backend liveness.
    pub async fn health(&self) -> Result<HealthStatus> {
        endpoints::health(&self.http, &self.base_url).await
    }
}
