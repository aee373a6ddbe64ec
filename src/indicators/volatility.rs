//! Recent volatility as the average intrabar range
//!
//! Each candle contributes `(high - low) / close * 100`. The estimate is the
//! mean over the last 72 candles (6 hours of 5-minute data), floored at 1.5%
//! so that quiet markets do not produce absurd time estimates downstream.

use crate::error::SignalError;
use crate::models::Candle;

/// Candles averaged for the estimate
pub const VOLATILITY_WINDOW: usize = 72;

/// Lowest volatility (percent) ever reported
pub const VOLATILITY_FLOOR_PCT: f64 = 1.5;

/// Intrabar range of one candle as a percent of its close
pub fn range_percent(candle: &Candle) -> f64 {
    (candle.high - candle.low) / candle.close * 100.0
}

/// Estimate volatility (percent) from the most recent candles
pub fn estimate_volatility(candles: &[Candle]) -> Result<f64, SignalError> {
    if candles.len() < VOLATILITY_WINDOW {
        return Err(SignalError::InsufficientData {
            required: VOLATILITY_WINDOW,
            available: candles.len(),
        });
    }

    let recent = &candles[candles.len() - VOLATILITY_WINDOW..];
    let mean = recent.iter().map(range_percent).sum::<f64>() / VOLATILITY_WINDOW as f64;

    Ok(mean.max(VOLATILITY_FLOOR_PCT))
}
