use super::{
    signals::{decide, SignalConfig},
    Strategy,
};
use crate::indicators::{
    compute_indicators, estimate_volatility, latest_values, IndicatorConfig, VOLATILITY_WINDOW,
};
use crate::models::{CandleSeries, TradeRecommendation, TradingPair};
use crate::Result;

/// Trend-following entry with an OCO exit bracket
///
/// This strategy combines:
/// - EMA 9/50 and MACD crossovers for trend direction
/// - RSI to skip overbought longs and oversold shorts
/// - Recent intrabar volatility to size the stop and the time estimate
///
/// Designed for short intraday trades on 5-minute candles
#[derive(Debug, Clone, Default)]
pub struct BracketStrategy {
    indicators: IndicatorConfig,
    signals: SignalConfig,
}

impl BracketStrategy {
    pub fn new(indicators: IndicatorConfig, signals: SignalConfig) -> Self {
        Self {
            indicators,
            signals,
        }
    }
}

impl Strategy for BracketStrategy {
    fn recommend(&self, pair: TradingPair, series: &CandleSeries) -> Result<TradeRecommendation> {
        let volatility = estimate_volatility(series.candles())?;
        let snapshots = compute_indicators(series, &self.indicators)?;
        let latest = latest_values(&snapshots)?;

        if let Some(previous) = snapshots.len().checked_sub(2).map(|i| &snapshots[i]) {
            tracing::debug!(
                "{}: previous candle EMA9={:?} EMA50={:?} RSI={:?}",
                pair,
                previous.fast_ema,
                previous.slow_ema,
                previous.rsi
            );
        }

        Ok(decide(pair, &latest, volatility, &self.signals))
    }

    fn name(&self) -> &str {
        "BracketStrategy"
    }

    fn min_candles_required(&self) -> usize {
        self.indicators.min_candles_required().max(VOLATILITY_WINDOW)
    }
}
