use super::TradingPair;
use serde::{Deserialize, Serialize};

/// Trend classification. There is no neutral state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
}

/// OCO exit bracket: take-profit limit plus a stop-loss with a stop-limit buffer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bracket {
    pub limit_price: f64,
    pub stop_price: f64,
    pub stop_limit_price: f64,
}

/// Entry and exit prices of an actionable trade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPlan {
    pub entry_price: f64,
    /// Sell price for a long, buy-back price for a short
    pub exit_price: f64,
    pub bracket: Bracket,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TradeAction {
    Long(OrderPlan),
    Short(OrderPlan),
    NoSignal,
}

/// The single suggestion produced for one request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecommendation {
    pub pair: TradingPair,
    pub trend: Trend,
    pub action: TradeAction,
    /// 0, 60 or 70
    pub probability: u8,
    pub expected_gain_pct: f64,
    pub estimated_hours: f64,
}

impl TradeRecommendation {
    pub fn order_plan(&self) -> Option<&OrderPlan> {
        match &self.action {
            TradeAction::Long(plan) | TradeAction::Short(plan) => Some(plan),
            TradeAction::NoSignal => None,
        }
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.order_plan().map(|plan| &plan.bracket)
    }

    pub fn is_actionable(&self) -> bool {
        !matches!(self.action, TradeAction::NoSignal)
    }
}
