// Technical indicators module
// Implements EMA, RSI, MACD and range volatility for technical analysis

pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod snapshot;
pub mod volatility;

pub use macd::{calculate_macd_series, MacdSeries};
pub use moving_average::{calculate_ema, calculate_ema_series, calculate_ema_series_sparse};
pub use rsi::{calculate_rsi, calculate_rsi_series};
pub use snapshot::{
    compute_indicators, latest_values, IndicatorConfig, IndicatorSnapshot, IndicatorValues,
};
pub use volatility::{estimate_volatility, range_percent, VOLATILITY_FLOOR_PCT, VOLATILITY_WINDOW};
