//! Historical price series models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default lookback window when the caller does not pick one.
pub const DEFAULT_PERIOD: &str = "1y";

/// Default bar size when the caller does not pick one.
pub const DEFAULT_INTERVAL: &str = "1d";

/// One OHLCV bar of a price series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Decimal,
    pub adj_close: Option<Decimal>,
    pub volume: Option<Decimal>,
}

/// A price series for one symbol.
///
/// `period` and `interval` echo the request verbatim. They are provider
/// tokens (e.g. "1mo", "5y", "ytd" / "1m", "1h", "1wk") and are not checked
/// here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub symbol: String,
    pub period: String,
    pub interval: String,
    /// Bars ordered by timestamp ascending
    pub bars: Vec<PriceBar>,
}

impl PriceHistory {
    pub fn new(
        symbol: impl Into<String>,
        period: impl Into<String>,
        interval: impl Into<String>,
        bars: Vec<PriceBar>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            period: period.into(),
            interval: interval.into(),
            bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prices_serialize_as_numbers() {
        let history = PriceHistory::new(
            "AAPL",
            DEFAULT_PERIOD,
            DEFAULT_INTERVAL,
            vec![PriceBar {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap(),
                open: Some(dec!(187.15)),
                high: Some(dec!(188.44)),
                low: Some(dec!(183.89)),
                close: dec!(185.64),
                adj_close: None,
                volume: Some(dec!(82488700)),
            }],
        );

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["period"], "1y");
        assert_eq!(json["interval"], "1d");
        assert_eq!(json["bars"][0]["timestamp"], "2024-01-02T14:30:00Z");
        assert_eq!(json["bars"][0]["close"], serde_json::json!(185.64));
        assert!(json["bars"][0]["adjClose"].is_null());
    }
}
