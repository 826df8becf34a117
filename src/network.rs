//! Network constants for the dashboard endpoints.

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:4000";

/// Block metrics endpoint, relative to the base URL.
pub const BLOCKS_PATH: &str = "/api/blocks";

/// Market metrics endpoint, relative to the base URL.
pub const MARKET_PATH: &str = "/api/market";

/// Fixed period between two fetch cycles of the same dataset.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Capacity of the refresh event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 64;
