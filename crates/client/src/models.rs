//! Alert models shared by the snapshot endpoint and the push channel.
//!
//! # What this module handles:
//! - Deserialization of alert data from both delivery paths
//! - Display normalization for the details payload
//!
//! # What this module does NOT handle:
//! - HTTP calls (see [`crate::endpoints`])
//! - Ordering or bounding of alert lists (owned by the synchronizer)

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One alert as delivered by the backend.
///
/// The same shape arrives from both sources: the snapshot endpoint
/// returns a JSON array of these (oldest-first), the push channel one
/// per text frame. Ids are server-assigned and equality-comparable,
/// but NOT guaranteed unique across reconnect/poll boundaries, so
/// consumers must not dedup by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Creation timestamp, ISO-8601-ish. The backend emits both
    /// offset-qualified and naive forms, so this stays a string and
    /// [`AlertRecord::timestamp`] does the lenient parse.
    #[serde(default)]
    pub ts: Option<String>,
    /// Short category string, e.g. "PORT_SCAN".
    #[serde(rename = "type")]
    pub kind: String,
    /// Origin of the alert, typically a source IP.
    #[serde(default)]
    pub src: Option<String>,
    /// Detector payload. A pre-formatted string from the snapshot
    /// endpoint, a structured object from the push channel.
    #[serde(default)]
    pub details: Option<AlertDetails>,
}

impl AlertRecord {
    /// Parse the `ts` field, accepting RFC 3339 or a naive UTC
    /// datetime (the backend emits `isoformat()` with and without a
    /// trailing `Z`).
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.ts.as_deref()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Detector details, in either of the two shapes the backend emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertDetails {
    /// Pre-formatted string (stored form, returned by snapshots).
    Text(String),
    /// Structured mapping (live form, sent over the push channel).
    Data(Map<String, Value>),
}

impl AlertDetails {
    /// Normalize to a display string: text as-is, structured data
    /// pretty-printed.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Data(map) => {
                serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }
}

/// Response body of `DELETE /alerts`.
///
/// The backend reports how many rows it removed; callers treating the
/// purge as best-effort are free to ignore it.
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeOutcome {
    #[serde(default)]
    pub deleted: u64,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
}
