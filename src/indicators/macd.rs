//! Moving Average Convergence Divergence (MACD)
//!
//! MACD line = EMA(fast) - EMA(slow) of closing prices.
//! Signal line = EMA(signal) of the MACD line.
use super::moving_average::{calculate_ema_series, calculate_ema_series_sparse};

/// MACD and signal line, aligned with the input prices
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

pub fn calculate_macd_series(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast = calculate_ema_series(prices, fast_period);
    let slow = calculate_ema_series(prices, slow_period);

    let macd: Vec<Option<f64>> = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal = calculate_ema_series_sparse(&macd, signal_period);

    MacdSeries { macd, signal }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_warmup() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let series = calculate_macd_series(&prices, 12, 26, 9);

        assert!(series.macd[24].is_none());
        assert!(series.macd[25].is_some());
        assert!(series.signal[32].is_none());
        assert!(series.signal[33].is_some());
    }

    #[test]
    fn test_macd_flat_prices() {
        let prices = vec![50.0; 40];
        let series = calculate_macd_series(&prices, 12, 26, 9);

        assert_eq!(series.macd.last().copied().flatten(), Some(0.0));
        assert_eq!(series.signal.last().copied().flatten(), Some(0.0));
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let series = calculate_macd_series(&prices, 12, 26, 9);

        let macd = series.macd.last().copied().flatten().unwrap();
        let signal = series.signal.last().copied().flatten().unwrap();
        assert!(macd > 0.0);
        assert!(macd > signal);
    }

    #[test]
    fn test_macd_reference_values() {
        // Same fixture as the RSI reference test, checked against pandas `ta`
        let prices: Vec<f64> = (0..100)
            .map(|i| 100.0 + 0.2 * i as f64 + 2.0 * (0.5 * i as f64 + 4.0).sin())
            .collect();
        let series = calculate_macd_series(&prices, 12, 26, 9);

        assert!((series.macd[25].unwrap() - 1.2837357611).abs() < 1e-9);
        // Signal is seeded at the first MACD value, not at zero
        assert!((series.signal[33].unwrap() - 1.2707441544).abs() < 1e-9);
        assert!((series.macd[99].unwrap() - 1.6351978957).abs() < 1e-9);
        assert!((series.signal[99].unwrap() - 1.5390438691).abs() < 1e-9);
    }
}
