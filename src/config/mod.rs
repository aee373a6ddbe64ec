//! Runtime settings
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file,
//! then `CRYPTOSIGNAL_*` environment variables (e.g. `CRYPTOSIGNAL_CANDLE_LIMIT=120`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "cryptosignal.toml";
pub const ENV_PREFIX: &str = "CRYPTOSIGNAL";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub binance_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub rate_limit_per_minute: u32,
    /// Candles fetched per request
    pub candle_limit: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            binance_base_url: "https://api.binance.com".to_string(),
            request_timeout_secs: 10,
            max_retries: 3,
            retry_backoff_ms: 1000,
            rate_limit_per_minute: 60,
            candle_limit: 100,
            log_filter: "cryptosignal=info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings; a missing default file is fine, a missing explicit file is not
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = ::config::Config::builder()
            .set_default("binance_base_url", defaults.binance_base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("max_retries", defaults.max_retries)?
            .set_default("retry_backoff_ms", defaults.retry_backoff_ms)?
            .set_default("rate_limit_per_minute", defaults.rate_limit_per_minute)?
            .set_default("candle_limit", defaults.candle_limit as u64)?
            .set_default("log_filter", defaults.log_filter)?;

        builder = match path {
            Some(path) => builder.add_source(::config::File::from(path)),
            None => {
                builder.add_source(::config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
        };

        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read settings")?;

        settings
            .try_deserialize()
            .context("Failed to parse settings")
    }
}
