//! Turns recommendations into the text shown to the user

use crate::models::{TradeAction, TradeRecommendation, TradingPair, Trend};
use serde::Serialize;
use std::fmt;

pub const NO_SIGNAL_MESSAGE: &str = "No clear signal. Wait. (Technical conditions not met)";

/// A recommendation rendered to display strings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRecommendation {
    pub symbol: String,
    pub trend: String,
    pub order: String,
    pub probability: u8,
    pub expected_gain: String,
    /// Empty when there is no actionable signal
    pub time_estimate: String,
    /// Exactly three lines with a bracket, none without
    pub bracket_lines: Vec<String>,
}

/// Everything the view needs for one page load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub symbols: Vec<String>,
    pub result: Option<FormattedRecommendation>,
    pub notice: Option<String>,
}

impl Page {
    /// The page shown before anything has been submitted
    pub fn initial() -> Self {
        Self {
            symbols: TradingPair::ALL.iter().map(|p| p.symbol().to_string()).collect(),
            result: None,
            notice: None,
        }
    }
}

fn price(value: f64, pair: TradingPair) -> String {
    format!("{:.*}", pair.price_decimals() as usize, value)
}

pub fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Bullish => "Bullish",
        Trend::Bearish => "Bearish",
    }
}

pub fn order_description(rec: &TradeRecommendation) -> String {
    let pair = rec.pair;
    match &rec.action {
        TradeAction::Long(plan) => format!(
            "Buy {} at {}. Sell at {}.",
            pair,
            price(plan.entry_price, pair),
            price(plan.exit_price, pair)
        ),
        TradeAction::Short(plan) => format!(
            "Sell {} at {}. Buy at {}.",
            pair,
            price(plan.entry_price, pair),
            price(plan.exit_price, pair)
        ),
        TradeAction::NoSignal => NO_SIGNAL_MESSAGE.to_string(),
    }
}

pub fn bracket_description(rec: &TradeRecommendation) -> Vec<String> {
    let pair = rec.pair;
    let quote = pair.quote_asset();

    let limit_label = match rec.action {
        TradeAction::Long(_) => "Limit Sell Order",
        TradeAction::Short(_) => "Limit Buy Order",
        TradeAction::NoSignal => return Vec::new(),
    };

    match rec.bracket() {
        Some(bracket) => vec![
            format!("{}: {} {}", limit_label, price(bracket.limit_price, pair), quote),
            format!("Stop: {} {}", price(bracket.stop_price, pair), quote),
            format!(
                "Stop-Limit Limit: {} {}",
                price(bracket.stop_limit_price, pair),
                quote
            ),
        ],
        None => Vec::new(),
    }
}

pub fn time_estimate(rec: &TradeRecommendation) -> String {
    if rec.is_actionable() && rec.estimated_hours > 0.0 {
        format!("Estimated time: {:.1} hours", rec.estimated_hours)
    } else {
        String::new()
    }
}

pub fn format_recommendation(rec: &TradeRecommendation) -> FormattedRecommendation {
    FormattedRecommendation {
        symbol: rec.pair.symbol().to_string(),
        trend: trend_label(rec.trend).to_string(),
        order: order_description(rec),
        probability: rec.probability,
        expected_gain: format!("{:.2}%", rec.expected_gain_pct),
        time_estimate: time_estimate(rec),
        bracket_lines: bracket_description(rec),
    }
}

/// Plain-text rendering of a page
impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available assets: {}", self.symbols.join(", "))?;

        if let Some(notice) = &self.notice {
            writeln!(f, "\n{}", notice)?;
        }

        if let Some(result) = &self.result {
            writeln!(f, "\n{}", result.symbol)?;
            writeln!(f, "  Trend: {}", result.trend)?;
            writeln!(f, "  Order: {}", result.order)?;
            writeln!(f, "  Probability: {}%", result.probability)?;
            writeln!(f, "  Expected gain: {}", result.expected_gain)?;
            if !result.time_estimate.is_empty() {
                writeln!(f, "  {}", result.time_estimate)?;
            }
            if !result.bracket_lines.is_empty() {
                writeln!(f, "  OCO bracket:")?;
                for line in &result.bracket_lines {
                    writeln!(f, "    {}", line)?;
                }
            }
        }

        Ok(())
    }
}
