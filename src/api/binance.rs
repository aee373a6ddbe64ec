use super::MarketDataProvider;
use crate::config::Settings;
use crate::error::SignalError;
use crate::models::{Candle, CandleSeries, TradingPair, CANDLE_INTERVAL_MINUTES};
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

const KLINES_PATH: &str = "/api/v3/klines";
const KLINES_INTERVAL: &str = "5m";

// Type alias for the rate limiter to simplify signatures
type BinanceRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Binance public market data client (no API key needed for klines)
///
/// Clones share the same rate limiter.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_backoff_ms: u64,
    rate_limiter: Arc<BinanceRateLimiter>,
}

impl BinanceClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let per_minute =
            NonZeroU32::new(settings.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(Self {
            client,
            base_url: settings.binance_base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries.max(1),
            retry_backoff_ms: settings.retry_backoff_ms,
            rate_limiter,
        })
    }

    /// Make a rate-limited GET request with retry logic
    ///
    /// Retries 429, 5xx and transport errors with exponential backoff.
    /// Other 4xx responses fail immediately.
    async fn make_request(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<reqwest::Response> {
        for attempt in 1..=self.max_retries {
            self.rate_limiter.until_ready().await;

            let backoff_ms = self.retry_backoff_ms * 2_u64.pow(attempt - 1);
            let last_attempt = attempt == self.max_retries;

            match self.client.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    if (status.as_u16() == 429 || status.is_server_error()) && !last_attempt {
                        tracing::warn!(
                            "Binance returned {}, retrying in {}ms (attempt {}/{})",
                            status,
                            backoff_ms,
                            attempt,
                            self.max_retries
                        );
                        sleep(Duration::from_millis(backoff_ms)).await;
                        continue;
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    anyhow::bail!("Binance API error ({}): {}", status, error_text);
                }
                Err(e) if !last_attempt => {
                    tracing::warn!(
                        "Network error: {}, retrying in {}ms (attempt {}/{})",
                        e,
                        backoff_ms,
                        attempt,
                        self.max_retries
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(e) => anyhow::bail!("Network error after {} attempts: {}", self.max_retries, e),
            }
        }

        anyhow::bail!("Failed after {} attempts", self.max_retries)
    }

    /// Fetch the most recent 5-minute klines, oldest first
    pub async fn get_klines(
        &self,
        pair: TradingPair,
        limit: usize,
    ) -> anyhow::Result<Vec<Candle>> {
        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let query = [
            ("symbol", pair.exchange_symbol()),
            ("interval", KLINES_INTERVAL.to_string()),
            ("limit", limit.to_string()),
        ];

        tracing::debug!("Fetching {} {} klines for {}", limit, KLINES_INTERVAL, pair);

        let response = self.make_request(&url, &query).await?;

        // Binance klines format: [open_time, open, high, low, close, volume, ...]
        let rows: Vec<Vec<Value>> = response
            .json()
            .await
            .context("Failed to parse Binance klines response")?;

        let candles = rows
            .iter()
            .map(|row| parse_kline(row.as_slice()))
            .collect::<Option<Vec<Candle>>>()
            .context("Malformed kline row in Binance response")?;

        tracing::debug!("Fetched {} candles for {}", candles.len(), pair);

        Ok(candles)
    }
}

/// Parse one kline row; prices and volume arrive as strings
fn parse_kline(row: &[Value]) -> Option<Candle> {
    if row.len() < 6 {
        return None;
    }

    let number = |value: &Value| -> Option<f64> {
        match value {
            Value::String(s) => s.parse().ok(),
            other => other.as_f64(),
        }
    };

    Some(Candle {
        timestamp: DateTime::<Utc>::from_timestamp_millis(row[0].as_i64()?)?,
        open: number(&row[1])?,
        high: number(&row[2])?,
        low: number(&row[3])?,
        close: number(&row[4])?,
        volume: number(&row[5])?,
    })
}

#[async_trait]
impl MarketDataProvider for BinanceClient {
    async fn fetch_candles(&self, pair: TradingPair, limit: usize) -> Result<CandleSeries> {
        let candles = self
            .get_klines(pair, limit)
            .await
            .map_err(|e| SignalError::DataUnavailable {
                symbol: pair.to_string(),
                reason: format!("{:#}", e),
            })?;

        if candles.is_empty() {
            return Err(SignalError::DataUnavailable {
                symbol: pair.to_string(),
                reason: "exchange returned no candles".to_string(),
            });
        }

        CandleSeries::new(candles, CANDLE_INTERVAL_MINUTES)
    }

    fn name(&self) -> &str {
        "Binance"
    }
}
