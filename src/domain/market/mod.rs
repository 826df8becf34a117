//! Market domain — off-chain volume and spot price.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::RawTimestamp;
use serde::{Deserialize, Serialize};

/// One market sample, as served by `GET /api/market`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataPoint {
    /// Traded volume in USD.
    pub market_volume: f64,
    pub timestamp: RawTimestamp,
    /// Spot price in USD.
    pub usd: f64,
}

impl MarketDataPoint {
    pub fn timestamp_display(&self) -> String {
        self.timestamp.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_point_deserializes_from_wire() {
        let json = r#"{"market_volume":1.2e10,"timestamp":"2023-11-14T22:13:20Z","usd":36000.5}"#;
        let point: MarketDataPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.market_volume, 1.2e10);
        assert_eq!(point.usd, 36000.5);
        assert_eq!(point.timestamp_display(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_market_point_numeric_timestamp() {
        let json = r#"{"market_volume":0,"timestamp":1700000000,"usd":1}"#;
        let point: MarketDataPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.timestamp_display(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_market_array_preserves_order() {
        let json = r#"[
            {"market_volume":3,"timestamp":3,"usd":3},
            {"market_volume":1,"timestamp":1,"usd":1},
            {"market_volume":2,"timestamp":2,"usd":2}
        ]"#;
        let points: Vec<MarketDataPoint> = serde_json::from_str(json).unwrap();
        let volumes: Vec<f64> = points.iter().map(|p| p.market_volume).collect();
        assert_eq!(volumes, [3.0, 1.0, 2.0]);
    }
}
