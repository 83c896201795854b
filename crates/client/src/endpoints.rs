//! HTTP endpoints of the alert backend.
//!
//! This module provides low-level functions over a shared
//! [`reqwest::Client`]; the [`crate::client::AlertsClient`] facade is
//! the usual entry point.
//!
//! # What this module handles:
//! - Snapshot retrieval (`GET /alerts?limit=<n>`)
//! - Server-side purge (`DELETE /alerts`)
//! - Health probe (`GET /health`)
//!
//! # What this module does NOT handle:
//! - The push channel (see the sync crate)
//! - Ordering policy: snapshots are returned oldest-first exactly as
//!   the backend sends them; reversing is the caller's concern.

use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::{AlertRecord, HealthStatus, PurgeOutcome};

use idsfeed_config::constants::{ALERTS_PATH, HEALTH_PATH};

/// Fetch the `limit` most recent alerts, oldest-first.
///
/// Any positive limit is accepted here; restricting limits to the
/// UI's enumerated history sizes happens at the settings boundary.
pub async fn fetch_alerts(
    client: &Client,
    base_url: &str,
    limit: usize,
) -> Result<Vec<AlertRecord>> {
    debug!(limit, "Fetching alert snapshot");

    let url = format!("{}{}", base_url, ALERTS_PATH);
    let response = client
        .get(&url)
        .query(&[("limit", limit.to_string())])
        .send()
        .await?;

    let response = check_status(response)?;
    response.json().await.map_err(|e| {
        ClientError::MalformedSnapshot(format!("Failed to parse alerts response: {}", e))
    })
}

/// Delete all alerts from the backend store.
///
/// Returns how many rows the backend reports deleting; a body in any
/// other shape counts as zero rather than an error, since callers
/// treat the purge as best-effort.
pub async fn purge_alerts(client: &Client, base_url: &str) -> Result<PurgeOutcome> {
    debug!("Purging all alerts");

    let url = format!("{}{}", base_url, ALERTS_PATH);
    let response = client.delete(&url).send().await?;

    let response = check_status(response)?;
    Ok(response
        .json()
        .await
        .unwrap_or(PurgeOutcome { deleted: 0 }))
}

/// Probe backend liveness via `GET /health`.
pub async fn health(client: &Client, base_url: &str) -> Result<HealthStatus> {
    debug!("Checking backend health");

    let url = format!("{}{}", base_url, HEALTH_PATH);
    let response = client.get(&url).send().await?;

    let response = check_status(response)?;
    response
        .json()
        .await
        .map_err(|e| ClientError::MalformedSnapshot(format!("Failed to parse health response: {}", e)))
}

/// Map a non-2xx response to [`ClientError::Api`].
fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClientError::Api {
            status: response.status().as_u16(),
            url: response.url().to_string(),
        })
    }
}
