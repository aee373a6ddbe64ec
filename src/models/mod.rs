pub mod pair;
pub mod recommendation;

pub use pair::TradingPair;
pub use recommendation::{Bracket, OrderPlan, TradeAction, TradeRecommendation, Trend};

use crate::error::SignalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minutes between consecutive candles
pub const CANDLE_INTERVAL_MINUTES: i64 = 5;

/// OHLCV candlestick data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Candles for one pair, oldest first, evenly spaced
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series, checking that timestamps step by exactly `interval_minutes`
    pub fn new(candles: Vec<Candle>, interval_minutes: i64) -> Result<Self, SignalError> {
        let expected_secs = interval_minutes * 60;

        for window in candles.windows(2) {
            let time_diff = (window[1].timestamp - window[0].timestamp).num_seconds();

            if time_diff <= 0 {
                return Err(SignalError::MalformedSeries(format!(
                    "candles are not sorted by timestamp ({} then {})",
                    window[0].timestamp, window[1].timestamp
                )));
            }

            if time_diff != expected_secs {
                return Err(SignalError::MalformedSeries(format!(
                    "{}s between candles at {} (expected {}s)",
                    time_diff,
                    window[0].timestamp.format("%H:%M:%S"),
                    expected_secs
                )));
            }
        }

        Ok(Self { candles })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
