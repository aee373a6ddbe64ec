/// Calculate Relative Strength Index (RSI) for every price
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Gains and losses are smoothed with Wilder's factor `1 / period`, starting
/// from a zero change at the first price. The first `period - 1` entries are
/// `None`. When the smoothed loss is zero the RSI is 100.
pub fn calculate_rsi_series(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; prices.len()];
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            let change = if i == 0 { 0.0 } else { price - prices[i - 1] };
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);

            if i == 0 {
                avg_gain = gain;
                avg_loss = loss;
            } else {
                avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
                avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
            }

            if i + 1 < period {
                return None;
            }

            if avg_loss == 0.0 {
                return Some(100.0);
            }

            let rs = avg_gain / avg_loss;
            Some(100.0 - (100.0 / (1.0 + rs)))
        })
        .collect()
}

/// Latest RSI value, or None if insufficient data
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    calculate_rsi_series(prices, period).last().copied().flatten()
}
