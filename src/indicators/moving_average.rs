/// Calculate an Exponential Moving Average (EMA) series
///
/// Uses smoothing factor `2 / (period + 1)` seeded with the first observation,
/// the same recursion pandas applies with `ewm(span=period, adjust=False)`.
/// Entries before `period` observations have been seen are `None`.
pub fn calculate_ema_series(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let values: Vec<Option<f64>> = prices.iter().copied().map(Some).collect();
    calculate_ema_series_sparse(&values, period)
}

/// EMA over a series whose leading entries may be undefined
///
/// Smoothing starts at the first defined value and `period` counts defined
/// values only. Used to smooth derived series such as the MACD line.
pub fn calculate_ema_series_sparse(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema: Option<f64> = None;
    let mut observations = 0;

    values
        .iter()
        .map(|value| {
            let value = (*value)?;
            let next = match ema {
                Some(prev) => (value - prev) * multiplier + prev,
                None => value,
            };
            ema = Some(next);
            observations += 1;

            if observations >= period {
                Some(next)
            } else {
                None
            }
        })
        .collect()
}

/// Latest EMA value, or None if insufficient data
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    calculate_ema_series(prices, period).last().copied().flatten()
}
