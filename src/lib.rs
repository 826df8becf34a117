//! # chain-dashboard
//!
//! Data layer for a live block explorer dashboard: on-chain block metrics and
//! off-chain market metrics, polled from two HTTP endpoints and projected into
//! chart-ready time series.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Record types, timestamp normalization, store, projection
//!    (always available, no runtime required)
//! 2. **HTTP API** — `DashboardHttp`, one method per endpoint
//! 3. **Polling** — `PollingScheduler`, two independent refresh loops on tokio
//! 4. **High-Level Client** — `Dashboard` with per-dataset sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chain_dashboard::prelude::*;
//!
//! let mut dashboard = Dashboard::builder()
//!     .api_url("http://127.0.0.1:4000")
//!     .build()?;
//!
//! dashboard.start();
//! let view = dashboard.view().await;
//! if let Some(card) = &view.latest {
//!     println!("{card}");
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared wire types and timestamp normalization.
pub mod shared;

/// Domain modules (vertical slices): blocks, market.
pub mod domain;

/// The two live datasets.
pub mod store;

/// Chart-ready series derived from the store.
pub mod projection;

/// Unified error types.
pub mod error;

/// Endpoint and cadence constants.
pub mod network;

/// Configuration: defaults, builder input, environment overrides.
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the dashboard endpoints.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Polling ─────────────────────────────────────────────────────────

/// Periodic refresh of both datasets.
#[cfg(feature = "native")]
pub mod scheduler;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `Dashboard` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared
    pub use crate::shared::{normalize, RawTimestamp, INVALID_DATE};

    // Domain types
    pub use crate::domain::block::{Block, BlockSummary};
    pub use crate::domain::market::MarketDataPoint;
    pub use crate::domain::Dataset;

    // Store + projection
    pub use crate::projection::chart::{ChartData, ChartDataset};
    pub use crate::projection::{latest_block, BlockSeries, DashboardView, MarketSeries};
    pub use crate::store::{DatasetSnapshot, DatasetStore};

    // Errors
    pub use crate::error::{ConfigError, DashboardError, HttpError};

    // Config
    pub use crate::config::DashboardConfig;
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_REFRESH_INTERVAL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{BlocksClient, Dashboard, DashboardBuilder, MarketClient};
    #[cfg(feature = "http")]
    pub use crate::http::DashboardHttp;

    // Polling
    #[cfg(feature = "native")]
    pub use crate::scheduler::{DatasetSource, PollingScheduler, RefreshEvent};
}
