//! High-level client — `Dashboard` with nested sub-client accessors.
//!
//! Each dataset has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared store, and the polling
//! lifecycle.

use crate::config::DashboardConfig;
use crate::domain::block::client::Blocks;
use crate::domain::market::client::Market;
use crate::error::DashboardError;
use crate::http::DashboardHttp;
use crate::projection::DashboardView;
use crate::store::DatasetStore;

use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "native")]
use crate::scheduler::{PollingScheduler, RefreshEvent};
#[cfg(feature = "native")]
use futures_util::stream::Stream;
#[cfg(feature = "native")]
use std::pin::Pin;
#[cfg(feature = "native")]
use tokio::sync::mpsc;

// Re-export sub-client types for convenience.
pub use crate::domain::block::client::Blocks as BlocksClient;
pub use crate::domain::market::client::Market as MarketClient;

/// The primary entry point: one dashboard's data, fetched and kept fresh.
///
/// The dashboard owns its store. Dropping it stops polling and discards
/// both datasets.
pub struct Dashboard {
    pub(crate) http: Arc<DashboardHttp>,
    pub(crate) store: DatasetStore,
    config: DashboardConfig,
    #[cfg(feature = "native")]
    scheduler: PollingScheduler<DashboardHttp>,
    #[cfg(feature = "native")]
    event_rx: tokio::sync::Mutex<mpsc::Receiver<RefreshEvent>>,
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Build from a complete config.
    pub fn from_config(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let http = Arc::new(DashboardHttp::new(&config.api_url, config.request_timeout)?);
        let store = DatasetStore::new();

        #[cfg(feature = "native")]
        let (scheduler, event_rx) = {
            let (event_tx, event_rx) = mpsc::channel(config.event_buffer.max(1));
            let scheduler =
                PollingScheduler::new(Arc::clone(&http), store.clone(), config.refresh_interval)
                    .with_events(event_tx);
            (scheduler, tokio::sync::Mutex::new(event_rx))
        };

        Ok(Self {
            http,
            store,
            config,
            #[cfg(feature = "native")]
            scheduler,
            #[cfg(feature = "native")]
            event_rx,
        })
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn blocks(&self) -> Blocks<'_> {
        Blocks { client: self }
    }

    pub fn market(&self) -> Market<'_> {
        Market { client: self }
    }

    // ── State ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Project the current store contents. Recomputed on every call.
    pub async fn view(&self) -> DashboardView {
        DashboardView::project(&self.store.snapshot().await)
    }

    // ── Polling lifecycle ────────────────────────────────────────────────

    /// Start polling both endpoints. Returns `false` if already polling.
    #[cfg(feature = "native")]
    pub fn start(&mut self) -> bool {
        self.scheduler.start()
    }

    /// Stop polling. No dataset changes after this returns, even if a
    /// request that was in flight completes later.
    #[cfg(feature = "native")]
    pub async fn stop(&mut self) {
        self.scheduler.stop().await;
    }

    #[cfg(feature = "native")]
    pub fn is_polling(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Stream of refresh outcomes.
    ///
    /// The returned stream borrows `self`, so it must be dropped
    /// before calling `stop()`.
    #[cfg(feature = "native")]
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = RefreshEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct DashboardBuilder {
    config: DashboardConfig,
}

impl DashboardBuilder {
    /// Start from an existing config, e.g. [`DashboardConfig::from_env`].
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api_url(mut self, url: &str) -> Self {
        self.config.api_url = url.to_string();
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval = interval;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.config.event_buffer = capacity;
        self
    }

    pub fn build(self) -> Result<Dashboard, DashboardError> {
        Dashboard::from_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_builder_applies_settings() {
        let dashboard = Dashboard::builder()
            .api_url("http://localhost:9000")
            .refresh_interval(Duration::from_secs(10))
            .request_timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        let config = dashboard.config();
        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_builder_rejects_zero_interval() {
        let result = Dashboard::builder().refresh_interval(Duration::ZERO).build();
        assert!(matches!(
            result,
            Err(DashboardError::Config(ConfigError::ZeroInterval))
        ));
    }

    #[tokio::test]
    async fn test_fresh_dashboard_view_is_empty() {
        let dashboard = Dashboard::builder().build().unwrap();
        let view = dashboard.view().await;
        assert!(view.latest.is_none());
        assert!(view.blocks.is_empty());
        assert!(view.market.is_empty());
    }

    #[cfg(feature = "native")]
    #[tokio::test]
    async fn test_start_stop_lifecycle() {
        let mut dashboard = Dashboard::builder()
            .api_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        assert!(!dashboard.is_polling());
        assert!(dashboard.start());
        assert!(dashboard.is_polling());
        dashboard.stop().await;
        assert!(!dashboard.is_polling());
    }
}
