use crate::error::SignalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The trading pairs offered for analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TradingPair {
    #[serde(rename = "BTC/USDT")]
    BtcUsdt,
    #[serde(rename = "ETH/USDT")]
    EthUsdt,
    #[serde(rename = "BNB/USDT")]
    BnbUsdt,
    #[serde(rename = "XRP/USDT")]
    XrpUsdt,
}

impl TradingPair {
    /// All supported pairs, in display order
    pub const ALL: [TradingPair; 4] = [
        TradingPair::BtcUsdt,
        TradingPair::EthUsdt,
        TradingPair::BnbUsdt,
        TradingPair::XrpUsdt,
    ];

    /// Display symbol, e.g. "BTC/USDT"
    pub fn symbol(&self) -> &'static str {
        match self {
            TradingPair::BtcUsdt => "BTC/USDT",
            TradingPair::EthUsdt => "ETH/USDT",
            TradingPair::BnbUsdt => "BNB/USDT",
            TradingPair::XrpUsdt => "XRP/USDT",
        }
    }

    pub fn base_asset(&self) -> &'static str {
        match self {
            TradingPair::BtcUsdt => "BTC",
            TradingPair::EthUsdt => "ETH",
            TradingPair::BnbUsdt => "BNB",
            TradingPair::XrpUsdt => "XRP",
        }
    }

    pub fn quote_asset(&self) -> &'static str {
        "USDT"
    }

    /// Symbol as the exchange expects it (no separator), e.g. "BTCUSDT"
    pub fn exchange_symbol(&self) -> String {
        format!("{}{}", self.base_asset(), self.quote_asset())
    }

    /// Decimal places used for every price of this pair
    ///
    /// XRP trades well below one dollar, so it keeps 4 places; the rest use 2.
    pub fn price_decimals(&self) -> u32 {
        match self {
            TradingPair::XrpUsdt => 4,
            _ => 2,
        }
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TradingPair {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        TradingPair::ALL
            .into_iter()
            .find(|pair| pair.symbol() == normalized || pair.exchange_symbol() == normalized)
            .ok_or_else(|| SignalError::UnsupportedSymbol(s.to_string()))
    }
}
