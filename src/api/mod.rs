pub mod binance;
pub mod synthetic;

pub use binance::BinanceClient;
pub use synthetic::{MarketScenario, SyntheticProvider};

use crate::models::{CandleSeries, TradingPair};
use crate::Result;
use async_trait::async_trait;

/// Source of recent 5-minute candles
///
/// Implementations return the series oldest first, or
/// `SignalError::DataUnavailable` when nothing usable came back.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_candles(&self, pair: TradingPair, limit: usize) -> Result<CandleSeries>;

    fn name(&self) -> &str;
}
