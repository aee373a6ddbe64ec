// Trading strategy module
pub mod bracket;
pub mod signals;

use crate::models::{CandleSeries, TradeRecommendation, TradingPair};
use crate::Result;

/// Base trait for recommendation strategies
pub trait Strategy: Send + Sync {
    /// Produce one recommendation from a candle series
    fn recommend(&self, pair: TradingPair, series: &CandleSeries) -> Result<TradeRecommendation>;

    /// Get strategy name
    fn name(&self) -> &str;

    /// Minimum candles required for this strategy
    fn min_candles_required(&self) -> usize;
}
