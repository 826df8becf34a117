//! Market sub-client — one-shot fetches and reads of the market dataset.

use super::MarketDataPoint;
use crate::client::Dashboard;
use crate::error::DashboardError;
use crate::projection::MarketSeries;
use std::sync::Arc;

/// Sub-client for the market dataset.
pub struct Market<'a> {
    pub(crate) client: &'a Dashboard,
}

impl<'a> Market<'a> {
    pub async fn fetch(&self) -> Result<Vec<MarketDataPoint>, DashboardError> {
        Ok(self.client.http.get_market().await?)
    }

    /// Fetch once and replace the stored market points.
    pub async fn refresh(&self) -> Result<usize, DashboardError> {
        let points = self.fetch().await?;
        let len = points.len();
        self.client.store.replace_market(points).await;
        Ok(len)
    }

    pub async fn current(&self) -> Arc<Vec<MarketDataPoint>> {
        self.client.store.market().await
    }

    pub async fn series(&self) -> MarketSeries {
        MarketSeries::project(&self.current().await)
    }
}
