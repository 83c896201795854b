//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for testing the alerts client against
//! a wiremock backend.

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use serde_json::{Value, json};

/// A snapshot body in the backend's shape: oldest-first, string details.
#[allow(dead_code)]
pub fn snapshot_body(ids: &[i64]) -> Value {
    Value::Array(ids.iter().map(|id| stored_alert(*id)).collect())
}

/// One stored alert as the snapshot endpoint serializes it.
#[allow(dead_code)]
pub fn stored_alert(id: i64) -> Value {
    json!({
        "id": id,
        "ts": format!("2024-05-01T12:00:{:02}", id % 60),
        "type": "PORT_SCAN",
        "src": "10.0.0.5",
        "details": "{\"type\": \"PORT_SCAN\", \"count\": 9, \"window_sec\": 10}"
    })
}
