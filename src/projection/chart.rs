//! Line-chart input consumed by the renderer.

use serde::{Deserialize, Serialize};

pub const TRANSACTION_COUNT_LABEL: &str = "Transaction Count";
pub const MINER_FEE_LABEL: &str = "Miner Fee (BTC)";
pub const TPS_LABEL: &str = "TPS (Transactions per second)";
pub const MARKET_VOLUME_LABEL: &str = "Market Volume (USD)";
pub const PRICE_LABEL: &str = "Price (USD)";

pub const TRANSACTION_COUNT_COLOR: &str = "rgba(75, 192, 192, 1)";
pub const MINER_FEE_COLOR: &str = "rgba(255, 99, 132, 1)";
pub const TPS_COLOR: &str = "rgba(54, 162, 235, 1)";
pub const MARKET_VOLUME_COLOR: &str = "rgba(153, 102, 255, 1)";
pub const PRICE_COLOR: &str = "rgba(212, 102, 155, 1)";

/// Labels plus one or more series sharing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData<L> {
    pub labels: Vec<L>,
    pub datasets: Vec<ChartDataset>,
}

/// One line on a chart. `data` is index-aligned with the chart's labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub fill: bool,
}

impl ChartDataset {
    pub fn line(label: &str, border_color: &str, data: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            data,
            border_color: border_color.to_string(),
            fill: false,
        }
    }
}
