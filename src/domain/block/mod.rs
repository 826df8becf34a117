//! Block domain — per-block chain metrics and the "current block" card.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::RawTimestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places between the fee's base unit and BTC.
pub const FEE_DECIMALS: u32 = 8;

/// One mined block, as served by `GET /api/blocks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    pub transaction_count: u64,
    /// Fee in satoshis.
    pub fee: i64,
    pub tps: f64,
    pub time: RawTimestamp,
}

impl Block {
    /// Fee in BTC, exact.
    pub fn fee_btc(&self) -> Decimal {
        Decimal::new(self.fee, FEE_DECIMALS).normalize()
    }

    /// Block time as a UTC display string.
    pub fn time_display(&self) -> String {
        self.time.display()
    }
}

/// The "current block" card.
///
/// Derived from the last block of the fetched sequence, which is not
/// necessarily the highest one if the endpoint returns rows out of order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub height: u64,
    pub transaction_count: u64,
    pub fee_btc: Decimal,
    pub tps: f64,
    pub timestamp: String,
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        Self {
            height: block.height,
            transaction_count: block.transaction_count,
            fee_btc: block.fee_btc(),
            tps: block.tps,
            timestamp: block.time_display(),
        }
    }
}

impl fmt::Display for BlockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Block: {}", self.height)?;
        writeln!(f, "Transaction Count: {}", self.transaction_count)?;
        writeln!(f, "Miner Fee(MAX per KB): {} BTC", self.fee_btc)?;
        writeln!(f, "TPS: {}", self.tps)?;
        write!(f, "Timestamp: {}", self.timestamp)
    }
}
