//! IDS backend REST client.
//!
//! This crate provides a type-safe client for the alert backend's HTTP
//! surface: the snapshot endpoint (`GET /alerts`), the purge endpoint
//! (`DELETE /alerts`), and the health probe (`GET /health`). The push
//! channel lives in the sync crate; this crate only defines the alert
//! model both sources share.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::{AlertsClient, AlertsClientBuilder};
pub use error::{ClientError, Result};
pub use models::{AlertDetails, AlertRecord, HealthStatus, PurgeOutcome};
