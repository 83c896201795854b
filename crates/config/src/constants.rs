//! Centralized constants for the IDS feed workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection Defaults
// =============================================================================

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Snapshot and purge endpoint path.
pub const ALERTS_PATH: &str = "/alerts";

/// Push channel endpoint path.
pub const WS_ALERTS_PATH: &str = "/ws/alerts";

/// Health probe endpoint path.
pub const HEALTH_PATH: &str = "/health";

// =============================================================================
// Feed Defaults
// =============================================================================

/// Default number of recent alerts kept in the display window.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// History limits the UI layer offers. The snapshot fetcher itself
/// accepts any positive limit; this enumeration is a UI-level bound.
pub const ALLOWED_HISTORY_LIMITS: [usize; 5] = [50, 100, 200, 500, 1000];

/// Interval between fallback snapshot polls in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 5000;
