//! Series projection — chart-ready arrays derived from a store snapshot.
//!
//! Everything here is a pure function of its input and is recomputed on
//! every read. Nothing is cached, so a projection can never lag behind the
//! store it was taken from.

pub mod chart;

use crate::domain::block::{Block, BlockSummary};
use crate::domain::market::MarketDataPoint;
use crate::shared::normalize;
use crate::store::DatasetSnapshot;

use chart::{ChartData, ChartDataset};
use serde::Serialize;

/// The last block of the sequence, if any.
///
/// Sequence order wins over height: an endpoint that returns rows out of
/// order produces a misleading card, and that is left uncorrected.
pub fn latest_block(blocks: &[Block]) -> Option<&Block> {
    blocks.last()
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

/// Block metrics keyed by height, in endpoint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockSeries {
    pub labels: Vec<u64>,
    pub transaction_count: Vec<u64>,
    /// Raw fee in satoshis; conversion to BTC happens at display time.
    pub fee: Vec<i64>,
    pub tps: Vec<f64>,
}

impl BlockSeries {
    pub fn project(blocks: &[Block]) -> Self {
        Self {
            labels: blocks.iter().map(|b| b.height).collect(),
            transaction_count: blocks.iter().map(|b| b.transaction_count).collect(),
            fee: blocks.iter().map(|b| b.fee).collect(),
            tps: blocks.iter().map(|b| b.tps).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn chart(&self) -> ChartData<u64> {
        ChartData {
            labels: self.labels.clone(),
            datasets: vec![
                ChartDataset::line(
                    chart::TRANSACTION_COUNT_LABEL,
                    chart::TRANSACTION_COUNT_COLOR,
                    self.transaction_count.iter().map(|&v| v as f64).collect(),
                ),
                ChartDataset::line(
                    chart::MINER_FEE_LABEL,
                    chart::MINER_FEE_COLOR,
                    self.fee.iter().map(|&v| v as f64).collect(),
                ),
                ChartDataset::line(chart::TPS_LABEL, chart::TPS_COLOR, self.tps.clone()),
            ],
        }
    }
}

// ─── Market ──────────────────────────────────────────────────────────────────

/// Market metrics keyed by normalized timestamp, in endpoint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSeries {
    pub labels: Vec<String>,
    pub market_volume: Vec<f64>,
    pub usd: Vec<f64>,
}

impl MarketSeries {
    pub fn project(points: &[MarketDataPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| normalize(&p.timestamp)).collect(),
            market_volume: points.iter().map(|p| p.market_volume).collect(),
            usd: points.iter().map(|p| p.usd).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn chart(&self) -> ChartData<String> {
        ChartData {
            labels: self.labels.clone(),
            datasets: vec![
                ChartDataset::line(
                    chart::MARKET_VOLUME_LABEL,
                    chart::MARKET_VOLUME_COLOR,
                    self.market_volume.clone(),
                ),
                ChartDataset::line(chart::PRICE_LABEL, chart::PRICE_COLOR, self.usd.clone()),
            ],
        }
    }
}

// ─── View ────────────────────────────────────────────────────────────────────

/// Everything the dashboard page renders, derived from one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    /// `None` until at least one block is known; the card is hidden then.
    pub latest: Option<BlockSummary>,
    pub blocks: BlockSeries,
    pub market: MarketSeries,
}

impl DashboardView {
    pub fn project(snapshot: &DatasetSnapshot) -> Self {
        Self {
            latest: latest_block(&snapshot.blocks).map(BlockSummary::from),
            blocks: BlockSeries::project(&snapshot.blocks),
            market: MarketSeries::project(&snapshot.market),
        }
    }
}
