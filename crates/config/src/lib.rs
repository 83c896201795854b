//! Configuration for the IDS feed client.
//!
//! This crate provides the connection settings shared by the snapshot
//! client and the feed synchronizer: a validated base URL plus the
//! derived endpoint and push-channel URLs.

pub mod constants;

mod settings;

pub use settings::{ConfigError, FeedSettings};
