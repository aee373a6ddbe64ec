//! Request entry point: one submission in, one rendered page out

use crate::api::MarketDataProvider;
use crate::models::{TradeRecommendation, TradingPair};
use crate::presentation::{format_recommendation, Page};
use crate::strategy::bracket::BracketStrategy;
use crate::strategy::Strategy;
use crate::Result;
use std::sync::Arc;
use std::time::Instant;

/// Runs the fetch → indicators → decision → format pipeline per request
///
/// Holds no per-request state, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct SignalService {
    provider: Arc<dyn MarketDataProvider>,
    strategy: Arc<dyn Strategy>,
    candle_limit: usize,
}

impl SignalService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, candle_limit: usize) -> Self {
        Self {
            provider,
            strategy: Arc::new(BracketStrategy::default()),
            candle_limit,
        }
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fetch candles for `pair` and build its recommendation
    pub async fn recommend(&self, pair: TradingPair) -> Result<TradeRecommendation> {
        let started = Instant::now();

        let series = self.provider.fetch_candles(pair, self.candle_limit).await?;
        tracing::info!(
            "Fetched {} candles for {} from {}",
            series.len(),
            pair,
            self.provider.name()
        );

        let recommendation = self.strategy.recommend(pair, &series)?;

        tracing::info!(
            "{} recommendation for {} ready in {}ms",
            self.strategy.name(),
            pair,
            started.elapsed().as_millis()
        );

        Ok(recommendation)
    }

    /// Build the page for a form submission; `None` is the initial page load
    ///
    /// Failures never escape: missing or short data leaves the result empty
    /// and explains why in the notice.
    pub async fn handle_submission(&self, symbol: Option<&str>) -> Page {
        let mut page = Page::initial();

        let Some(symbol) = symbol else {
            return page;
        };

        let pair = match symbol.parse::<TradingPair>() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("Rejected submission: {}", e);
                page.notice = Some(e.to_string());
                return page;
            }
        };

        match self.recommend(pair).await {
            Ok(recommendation) => {
                page.result = Some(format_recommendation(&recommendation));
            }
            Err(e) if e.is_no_result() => {
                tracing::warn!("No recommendation for {}: {}", pair, e);
                page.notice = Some(format!("No recommendation available for {}: {}", pair, e));
            }
            Err(e) => {
                tracing::error!("Pipeline failed for {}: {}", pair, e);
                page.notice = Some(format!("Could not analyze {}: {}", pair, e));
            }
        }

        page
    }
}
