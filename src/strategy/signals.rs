use crate::indicators::IndicatorValues;
use crate::models::{Bracket, OrderPlan, TradeAction, TradeRecommendation, TradingPair, Trend};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const TARGET_GAIN_PCT: f64 = 1.0;
pub const STOP_LOSS_VOLATILITY_MULTIPLIER: f64 = 1.5;
pub const MIN_STOP_LOSS_PCT: f64 = 2.5;
pub const MAX_STOP_LOSS_PCT: f64 = 4.0;
pub const STOP_LIMIT_OFFSET_PCT: f64 = 0.5;
pub const RSI_OVERBOUGHT: f64 = 75.0;
pub const RSI_OVERSOLD: f64 = 25.0;
pub const STRONG_PROBABILITY: u8 = 70;
pub const WEAK_PROBABILITY: u8 = 60;
pub const HOURS_PER_INVERSE_VOLATILITY: f64 = 6.0;
pub const DEFAULT_ESTIMATED_HOURS: f64 = 4.0;

/// Rule set of the bracket strategy
#[derive(Debug, Clone)]
pub struct SignalConfig {
    pub target_gain_pct: f64,
    pub stop_loss_volatility_multiplier: f64,
    pub min_stop_loss_pct: f64,
    pub max_stop_loss_pct: f64,
    /// Distance of the stop-limit beyond the stop, away from entry
    pub stop_limit_offset_pct: f64,
    pub rsi_overbought: f64, // No longs at or above this RSI
    pub rsi_oversold: f64,   // No shorts at or below this RSI
    pub strong_probability: u8,
    pub weak_probability: u8,
    pub hours_per_inverse_volatility: f64,
    pub default_estimated_hours: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            target_gain_pct: TARGET_GAIN_PCT,
            stop_loss_volatility_multiplier: STOP_LOSS_VOLATILITY_MULTIPLIER,
            min_stop_loss_pct: MIN_STOP_LOSS_PCT,
            max_stop_loss_pct: MAX_STOP_LOSS_PCT,
            stop_limit_offset_pct: STOP_LIMIT_OFFSET_PCT,
            rsi_overbought: RSI_OVERBOUGHT,
            rsi_oversold: RSI_OVERSOLD,
            strong_probability: STRONG_PROBABILITY,
            weak_probability: WEAK_PROBABILITY,
            hours_per_inverse_volatility: HOURS_PER_INVERSE_VOLATILITY,
            default_estimated_hours: DEFAULT_ESTIMATED_HOURS,
        }
    }
}

impl SignalConfig {
    /// Stop-loss distance in percent, scaled by volatility and clamped
    ///
    /// # Example
    /// ```
    /// use cryptosignal::strategy::signals::SignalConfig;
    ///
    /// let config = SignalConfig::default();
    /// assert_eq!(config.stop_loss_pct(0.1), 2.5);
    /// assert_eq!(config.stop_loss_pct(2.0), 3.0);
    /// assert_eq!(config.stop_loss_pct(10.0), 4.0);
    /// ```
    pub fn stop_loss_pct(&self, volatility_pct: f64) -> f64 {
        (volatility_pct * self.stop_loss_volatility_multiplier)
            .clamp(self.min_stop_loss_pct, self.max_stop_loss_pct)
    }

    /// Hours expected to reach the target; higher volatility means less time
    pub fn estimated_hours(&self, volatility_pct: f64) -> f64 {
        if volatility_pct > 0.0 {
            round_dp((1.0 / volatility_pct) * self.hours_per_inverse_volatility, 1)
        } else {
            self.default_estimated_hours
        }
    }
}

/// Round half-to-even on the exact binary value of `value`
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Bullish only when both the EMA pair and the MACD pair agree
pub fn classify_trend(values: &IndicatorValues) -> Trend {
    if values.fast_ema > values.slow_ema && values.macd > values.macd_signal {
        Trend::Bullish
    } else {
        Trend::Bearish
    }
}

/// Apply the rule set to the latest indicators and volatility
pub fn decide(
    pair: TradingPair,
    values: &IndicatorValues,
    volatility_pct: f64,
    config: &SignalConfig,
) -> TradeRecommendation {
    let decimals = pair.price_decimals();
    let trend = classify_trend(values);
    let stop_loss_pct = config.stop_loss_pct(volatility_pct);
    let entry_price = round_dp(values.close, decimals);

    tracing::debug!(
        "{}: close={:.4} EMA9={:.4} EMA50={:.4} RSI={:.1} MACD={:.4} signal={:.4} vol={:.2}% stop={:.2}%",
        pair,
        values.close,
        values.fast_ema,
        values.slow_ema,
        values.rsi,
        values.macd,
        values.macd_signal,
        volatility_pct,
        stop_loss_pct
    );

    let (action, probability, expected_gain_pct) = match trend {
        Trend::Bullish if values.rsi < config.rsi_overbought => {
            let target = round_dp(entry_price * (1.0 + config.target_gain_pct / 100.0), decimals);
            let stop = round_dp(entry_price * (1.0 - stop_loss_pct / 100.0), decimals);
            let stop_limit =
                round_dp(stop * (1.0 - config.stop_limit_offset_pct / 100.0), decimals);
            let probability = if values.macd > 0.0 {
                config.strong_probability
            } else {
                config.weak_probability
            };
            let gain = (target - entry_price) / entry_price * 100.0;

            let plan = OrderPlan {
                entry_price,
                exit_price: target,
                bracket: Bracket {
                    limit_price: target,
                    stop_price: stop,
                    stop_limit_price: stop_limit,
                },
            };
            (TradeAction::Long(plan), probability, gain)
        }
        Trend::Bearish if values.rsi > config.rsi_oversold => {
            let exit_buy = round_dp(entry_price * (1.0 - config.target_gain_pct / 100.0), decimals);
            let stop = round_dp(entry_price * (1.0 + stop_loss_pct / 100.0), decimals);
            let stop_limit =
                round_dp(stop * (1.0 + config.stop_limit_offset_pct / 100.0), decimals);
            let probability = if values.macd < 0.0 {
                config.strong_probability
            } else {
                config.weak_probability
            };
            let gain = (entry_price - exit_buy) / entry_price * 100.0;

            let plan = OrderPlan {
                entry_price,
                exit_price: exit_buy,
                bracket: Bracket {
                    limit_price: exit_buy,
                    stop_price: stop,
                    stop_limit_price: stop_limit,
                },
            };
            (TradeAction::Short(plan), probability, gain)
        }
        _ => (TradeAction::NoSignal, 0, 0.0),
    };

    let estimated_hours = match action {
        TradeAction::NoSignal => {
            tracing::info!(
                "{}: no signal ({:?} trend, RSI={:.1} outside entry band)",
                pair,
                trend,
                values.rsi
            );
            0.0
        }
        _ => {
            tracing::info!(
                "{}: {:?} trend, probability {}%, gain {:.2}%",
                pair,
                trend,
                probability,
                expected_gain_pct
            );
            config.estimated_hours(volatility_pct)
        }
    };

    TradeRecommendation {
        pair,
        trend,
        action,
        probability,
        expected_gain_pct,
        estimated_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(
        fast_ema: f64,
        slow_ema: f64,
        rsi: f64,
        macd: f64,
        macd_signal: f64,
    ) -> IndicatorValues {
        IndicatorValues {
            close: 100.0,
            fast_ema,
            slow_ema,
            rsi,
            macd,
            macd_signal,
        }
    }

    fn bullish(rsi: f64, macd: f64) -> IndicatorValues {
        values(101.0, 100.0, rsi, macd, macd - 0.5)
    }

    fn bearish(rsi: f64, macd: f64) -> IndicatorValues {
        values(99.0, 100.0, rsi, macd, macd + 0.5)
    }

    #[test]
    fn test_stop_loss_clamping() {
        let config = SignalConfig::default();
        assert_eq!(config.stop_loss_pct(0.1), 2.5);
        assert_eq!(config.stop_loss_pct(10.0), 4.0);
        assert_eq!(config.stop_loss_pct(2.0), 3.0);
        assert_eq!(config.stop_loss_pct(0.0), 2.5);
    }

    #[test]
    fn test_estimated_hours() {
        let config = SignalConfig::default();
        assert_eq!(config.estimated_hours(1.5), 4.0);
        assert_eq!(config.estimated_hours(2.0), 3.0);
        assert_eq!(config.estimated_hours(7.0), 0.9);
        assert_eq!(config.estimated_hours(0.0), DEFAULT_ESTIMATED_HOURS);
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(96.515, 4), 96.515);
        assert_eq!(round_dp(1.23456, 2), 1.23);
        assert_eq!(round_dp(0.52349, 4), 0.5235);
    }

    #[test]
    fn test_trend_requires_both_crossovers() {
        assert_eq!(classify_trend(&values(101.0, 100.0, 50.0, 1.0, 0.5)), Trend::Bullish);
        assert_eq!(classify_trend(&values(101.0, 100.0, 50.0, 0.5, 1.0)), Trend::Bearish);
        assert_eq!(classify_trend(&values(99.0, 100.0, 50.0, 1.0, 0.5)), Trend::Bearish);
        assert_eq!(classify_trend(&values(100.0, 100.0, 50.0, 1.0, 0.5)), Trend::Bearish);
    }

    #[test]
    fn test_long_xrp_example() {
        let rec = decide(
            TradingPair::XrpUsdt,
            &bullish(50.0, 1.0),
            2.0,
            &SignalConfig::default(),
        );

        let plan = match &rec.action {
            TradeAction::Long(plan) => plan,
            other => panic!("expected long, got {:?}", other),
        };
        assert_eq!(plan.entry_price, 100.0);
        assert_eq!(plan.exit_price, 101.0);
        assert_eq!(plan.bracket.limit_price, 101.0);
        assert_eq!(plan.bracket.stop_price, 97.0);
        assert_eq!(plan.bracket.stop_limit_price, 96.515);
        assert_eq!(rec.probability, 70);
        assert!((rec.expected_gain_pct - 1.0).abs() < 1e-9);
        assert_eq!(rec.estimated_hours, 3.0);
        assert_eq!(rec.trend, Trend::Bullish);
    }

    #[test]
    fn test_long_with_negative_macd_is_weaker() {
        let rec = decide(
            TradingPair::XrpUsdt,
            &bullish(50.0, -1.0),
            2.0,
            &SignalConfig::default(),
        );
        assert!(matches!(rec.action, TradeAction::Long(_)));
        assert_eq!(rec.probability, 60);
    }

    #[test]
    fn test_long_price_ordering() {
        for volatility in [1.5, 2.0, 2.7, 5.0] {
            let rec = decide(
                TradingPair::BtcUsdt,
                &bullish(60.0, 1.0),
                volatility,
                &SignalConfig::default(),
            );
            let plan = rec.order_plan().unwrap();
            assert!(plan.exit_price > plan.entry_price);
            assert!(plan.entry_price > plan.bracket.stop_price);
            assert!(plan.bracket.stop_price > plan.bracket.stop_limit_price);
        }
    }

    #[test]
    fn test_short_price_ordering() {
        let rec = decide(
            TradingPair::EthUsdt,
            &bearish(40.0, -1.0),
            3.0,
            &SignalConfig::default(),
        );

        let plan = match &rec.action {
            TradeAction::Short(plan) => plan,
            other => panic!("expected short, got {:?}", other),
        };
        assert!(plan.bracket.stop_limit_price > plan.bracket.stop_price);
        assert!(plan.bracket.stop_price > plan.entry_price);
        assert!(plan.entry_price > plan.exit_price);
        assert_eq!(plan.exit_price, 99.0);
        assert_eq!(plan.bracket.stop_price, 104.0);
        assert_eq!(plan.bracket.stop_limit_price, 104.52);
        assert_eq!(rec.probability, 70);
        assert!((rec.expected_gain_pct - 1.0).abs() < 1e-9);
        assert_eq!(rec.estimated_hours, 2.0);
    }

    #[test]
    fn test_short_with_positive_macd_is_weaker() {
        let rec = decide(
            TradingPair::EthUsdt,
            &bearish(40.0, 0.3),
            3.0,
            &SignalConfig::default(),
        );
        assert!(matches!(rec.action, TradeAction::Short(_)));
        assert_eq!(rec.probability, 60);
    }

    #[test]
    fn test_overbought_bullish_is_no_signal() {
        let rec = decide(
            TradingPair::BtcUsdt,
            &bullish(75.0, 1.0),
            2.0,
            &SignalConfig::default(),
        );

        assert_eq!(rec.trend, Trend::Bullish);
        assert_eq!(rec.action, TradeAction::NoSignal);
        assert_eq!(rec.probability, 0);
        assert_eq!(rec.expected_gain_pct, 0.0);
        assert_eq!(rec.estimated_hours, 0.0);
        assert!(rec.bracket().is_none());
    }

    #[test]
    fn test_oversold_bearish_is_no_signal() {
        let rec = decide(
            TradingPair::BnbUsdt,
            &bearish(25.0, -1.0),
            2.0,
            &SignalConfig::default(),
        );

        assert_eq!(rec.trend, Trend::Bearish);
        assert_eq!(rec.action, TradeAction::NoSignal);
        assert_eq!(rec.estimated_hours, 0.0);
    }

    #[test]
    fn test_zero_volatility_uses_default_hours() {
        let rec = decide(
            TradingPair::BtcUsdt,
            &bullish(50.0, 1.0),
            0.0,
            &SignalConfig::default(),
        );
        assert_eq!(rec.estimated_hours, 4.0);
        // Stop still respects the minimum distance
        assert_eq!(rec.bracket().unwrap().stop_price, 97.5);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let config = SignalConfig::default();
        let input = bearish(55.0, -0.2);
        let first = decide(TradingPair::XrpUsdt, &input, 2.3, &config);
        let second = decide(TradingPair::XrpUsdt, &input, 2.3, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_entry_rounded_to_pair_precision() {
        let mut input = bullish(50.0, 1.0);
        input.close = 0.523456;

        let rec = decide(TradingPair::XrpUsdt, &input, 2.0, &SignalConfig::default());
        assert_eq!(rec.order_plan().unwrap().entry_price, 0.5235);
    }
}
