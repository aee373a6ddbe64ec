use super::MarketDataProvider;
use crate::error::SignalError;
use crate::models::{Candle, CandleSeries, TradingPair, CANDLE_INTERVAL_MINUTES};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, DurationRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+2% daily average)
    Uptrend,
    /// Steady downtrend with noise (-2% daily average)
    Downtrend,
    /// Sideways/choppy market (±1% around mean)
    Sideways,
    /// High volatility (±3% large swings)
    Volatile,
}

/// Offline candle source, useful without network access
///
/// Every fetch starts from the same seed, so repeated requests for the same
/// pair and scenario return identical prices.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    scenario: MarketScenario,
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(scenario: MarketScenario, seed: u64) -> Self {
        Self { scenario, seed }
    }

    /// Generate `num_candles` 5-minute candles ending at the current boundary
    pub fn generate(&self, pair: TradingPair, num_candles: usize) -> Vec<Candle> {
        let end = Utc::now()
            .duration_trunc(Duration::minutes(CANDLE_INTERVAL_MINUTES))
            .unwrap_or_else(|_| Utc::now());
        let start = end - Duration::minutes(num_candles as i64 * CANDLE_INTERVAL_MINUTES);

        let mut generator = CandleGenerator {
            rng: StdRng::seed_from_u64(self.seed),
            base_price: base_price(pair),
            base_volume: 1_000_000.0,
        };
        generator.generate(self.scenario, start, num_candles)
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(MarketScenario::Sideways, 42)
    }
}

/// Rough price level of each pair
fn base_price(pair: TradingPair) -> f64 {
    match pair {
        TradingPair::BtcUsdt => 60_000.0,
        TradingPair::EthUsdt => 3_000.0,
        TradingPair::BnbUsdt => 550.0,
        TradingPair::XrpUsdt => 0.55,
    }
}

struct CandleGenerator {
    rng: StdRng,
    base_price: f64,
    base_volume: f64,
}

impl CandleGenerator {
    fn generate(
        &mut self,
        scenario: MarketScenario,
        start_time: DateTime<Utc>,
        num_candles: usize,
    ) -> Vec<Candle> {
        let mut candles = Vec::with_capacity(num_candles);
        let mut current_price = self.base_price;

        // ±2% per day spread over 5-minute intervals
        let intervals_per_day = 24.0 * 60.0 / CANDLE_INTERVAL_MINUTES as f64;
        let drift_per_interval = 0.02 / intervals_per_day;

        for i in 0..num_candles {
            let timestamp = start_time + Duration::minutes(i as i64 * CANDLE_INTERVAL_MINUTES);

            let change = match scenario {
                // Drift plus reduced noise so the trend is dominant
                MarketScenario::Uptrend => {
                    current_price * (drift_per_interval + self.rng.gen_range(-0.001..0.001))
                }
                MarketScenario::Downtrend => {
                    current_price * (-drift_per_interval + self.rng.gen_range(-0.001..0.001))
                }
                // Mean reversion force + noise
                MarketScenario::Sideways => {
                    (self.base_price - current_price) * 0.1
                        + current_price * self.rng.gen_range(-0.01..0.01)
                }
                MarketScenario::Volatile => current_price * self.rng.gen_range(-0.03..0.03),
            };
            current_price += change;

            // Prevent price from going too low
            current_price = current_price.max(self.base_price * 0.5);

            candles.push(self.create_candle(current_price, timestamp));
        }

        candles
    }

    /// Helper to create a candle from price and timestamp
    fn create_candle(&mut self, price: f64, timestamp: DateTime<Utc>) -> Candle {
        // ±1% intrabar movement, in line with 5-minute crypto ranges
        let noise_pct = 0.01;

        let high = price * (1.0 + self.rng.gen_range(0.0..noise_pct));
        let low = price * (1.0 - self.rng.gen_range(0.0..noise_pct));

        // Generate open and clamp it between low and high
        let open_raw = price * (1.0 + self.rng.gen_range(-noise_pct..noise_pct));
        let open = open_raw.clamp(low, high);

        // Vary volume ±30%
        let volume = self.base_volume * self.rng.gen_range(0.7..1.3);

        Candle {
            timestamp,
            open,
            high,
            low,
            close: price,
            volume,
        }
    }
}

#[async_trait]
impl MarketDataProvider for SyntheticProvider {
    async fn fetch_candles(&self, pair: TradingPair, limit: usize) -> Result<CandleSeries> {
        tracing::debug!(
            "Generating {} synthetic candles for {} ({:?}, seed {})",
            limit,
            pair,
            self.scenario,
            self.seed
        );
        let candles = self.generate(pair, limit);
        if candles.is_empty() {
            return Err(SignalError::DataUnavailable {
                symbol: pair.to_string(),
                reason: "no synthetic candles requested".to_string(),
            });
        }

        CandleSeries::new(candles, CANDLE_INTERVAL_MINUTES)
    }

    fn name(&self) -> &str {
        "Synthetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uptrend() {
        let provider = SyntheticProvider::new(MarketScenario::Uptrend, 42);
        let candles = provider.generate(TradingPair::BtcUsdt, 500);

        assert_eq!(candles.len(), 500);

        let first_price = candles.first().unwrap().close;
        let last_price = candles.last().unwrap().close;
        assert!(
            last_price > first_price,
            "Uptrend should end higher: {} -> {}",
            first_price,
            last_price
        );
    }

    #[test]
    fn test_generate_downtrend() {
        let provider = SyntheticProvider::new(MarketScenario::Downtrend, 42);
        let candles = provider.generate(TradingPair::EthUsdt, 500);

        let first_price = candles.first().unwrap().close;
        let last_price = candles.last().unwrap().close;
        assert!(
            last_price < first_price,
            "Downtrend should end lower: {} -> {}",
            first_price,
            last_price
        );
    }

    #[test]
    fn test_generate_sideways() {
        let provider = SyntheticProvider::new(MarketScenario::Sideways, 42);
        let candles = provider.generate(TradingPair::XrpUsdt, 500);

        // Should stay roughly around base price (±10%)
        let base = base_price(TradingPair::XrpUsdt);
        for candle in &candles {
            assert!(
                candle.close > base * 0.9 && candle.close < base * 1.1,
                "Sideways should stay near base: {} vs {}",
                candle.close,
                base
            );
        }
    }

    #[test]
    fn test_same_seed_same_prices() {
        let provider = SyntheticProvider::new(MarketScenario::Volatile, 7);
        let first: Vec<f64> = provider
            .generate(TradingPair::BnbUsdt, 100)
            .iter()
            .map(|c| c.close)
            .collect();
        let second: Vec<f64> = provider
            .generate(TradingPair::BnbUsdt, 100)
            .iter()
            .map(|c| c.close)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_ohlc_consistency() {
        let provider = SyntheticProvider::new(MarketScenario::Volatile, 42);

        for candle in provider.generate(TradingPair::BtcUsdt, 100) {
            assert!(candle.high >= candle.close, "High should be >= close");
            assert!(candle.high >= candle.open, "High should be >= open");
            assert!(candle.low <= candle.close, "Low should be <= close");
            assert!(candle.low <= candle.open, "Low should be <= open");
        }
    }

    #[test]
    fn test_fetch_candles_builds_uniform_series() {
        let provider = SyntheticProvider::default();
        let series =
            tokio_test::block_on(provider.fetch_candles(TradingPair::BtcUsdt, 100)).unwrap();

        assert_eq!(series.len(), 100);
        assert_eq!(provider.name(), "Synthetic");
    }

    #[test]
    fn test_zero_limit_is_data_unavailable() {
        let provider = SyntheticProvider::default();
        let result = tokio_test::block_on(provider.fetch_candles(TradingPair::EthUsdt, 0));

        assert!(matches!(result, Err(SignalError::DataUnavailable { .. })));
    }
}
