use thiserror::Error;

/// Errors produced while building a trade recommendation
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Market data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("Insufficient data: {available} candles, need {required}")]
    InsufficientData { required: usize, available: usize },

    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("Malformed candle series: {0}")]
    MalformedSeries(String),
}

impl SignalError {
    /// Whether the error should be shown as an empty result rather than a failure
    pub fn is_no_result(&self) -> bool {
        matches!(
            self,
            SignalError::DataUnavailable { .. } | SignalError::InsufficientData { .. }
        )
    }
}
