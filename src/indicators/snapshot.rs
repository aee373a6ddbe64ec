use super::macd::calculate_macd_series;
use super::moving_average::calculate_ema_series;
use super::rsi::calculate_rsi_series;
use crate::error::SignalError;
use crate::models::CandleSeries;
use serde::Serialize;

/// Indicator windows
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub fast_ema_period: usize,
    pub slow_ema_period: usize,
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            fast_ema_period: 9,
            slow_ema_period: 50,
            rsi_period: 14,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
        }
    }
}

impl IndicatorConfig {
    /// Candles needed before the latest snapshot has every value defined
    pub fn min_candles_required(&self) -> usize {
        let macd_warmup = self.macd_slow_period.max(self.macd_fast_period)
            + self.macd_signal_period.saturating_sub(1);

        self.slow_ema_period
            .max(self.fast_ema_period)
            .max(self.rsi_period)
            .max(macd_warmup)
    }
}

/// Indicator values at one candle; `None` while the window is warming up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub fast_ema: Option<f64>,
    pub slow_ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

/// A snapshot with every indicator defined, ready for decisions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorValues {
    pub close: f64,
    pub fast_ema: f64,
    pub slow_ema: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
}

impl IndicatorSnapshot {
    pub fn values(&self) -> Option<IndicatorValues> {
        Some(IndicatorValues {
            close: self.close,
            fast_ema: self.fast_ema?,
            slow_ema: self.slow_ema?,
            rsi: self.rsi?,
            macd: self.macd?,
            macd_signal: self.macd_signal?,
        })
    }
}

/// Compute indicator snapshots for every candle of the series
///
/// The indicators are path dependent, so the whole history is smoothed even
/// though only the last entries are used.
pub fn compute_indicators(
    series: &CandleSeries,
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorSnapshot>, SignalError> {
    let required = config.min_candles_required();
    if series.len() < required {
        return Err(SignalError::InsufficientData {
            required,
            available: series.len(),
        });
    }

    let closes = series.closes();
    let fast = calculate_ema_series(&closes, config.fast_ema_period);
    let slow = calculate_ema_series(&closes, config.slow_ema_period);
    let rsi = calculate_rsi_series(&closes, config.rsi_period);
    let macd = calculate_macd_series(
        &closes,
        config.macd_fast_period,
        config.macd_slow_period,
        config.macd_signal_period,
    );

    let snapshots = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| IndicatorSnapshot {
            close,
            fast_ema: fast[i],
            slow_ema: slow[i],
            rsi: rsi[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
        })
        .collect();

    Ok(snapshots)
}

/// Latest complete indicator values of the series
pub fn latest_values(snapshots: &[IndicatorSnapshot]) -> Result<IndicatorValues, SignalError> {
    snapshots
        .last()
        .and_then(IndicatorSnapshot::values)
        .ok_or(SignalError::InsufficientData {
            required: IndicatorConfig::default().min_candles_required(),
            available: snapshots.len(),
        })
}
