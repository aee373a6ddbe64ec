use anyhow::Result;
use clap::Parser;
use cryptosignal::api::{BinanceClient, MarketDataProvider, MarketScenario, SyntheticProvider};
use cryptosignal::config::Settings;
use cryptosignal::SignalService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Trade suggestion with an OCO bracket for one crypto pair
#[derive(Debug, Parser)]
#[command(name = "cryptosignal", version, about)]
struct Cli {
    /// Pair to analyze (BTC/USDT, ETH/USDT, BNB/USDT, XRP/USDT); omit to list them
    symbol: Option<String>,

    /// Settings file (defaults to ./cryptosignal.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use generated candles instead of Binance
    #[arg(long)]
    offline: bool,

    /// Market shape for --offline
    #[arg(long, value_enum, default_value_t = MarketScenario::Sideways)]
    scenario: MarketScenario,

    /// Seed for --offline
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    setup_logging(&settings);

    let provider: Arc<dyn MarketDataProvider> = if cli.offline {
        tracing::info!("Offline mode: {:?} scenario, seed {}", cli.scenario, cli.seed);
        Arc::new(SyntheticProvider::new(cli.scenario, cli.seed))
    } else {
        Arc::new(BinanceClient::new(&settings)?)
    };

    let service = SignalService::new(provider, settings.candle_limit);
    let page = service.handle_submission(cli.symbol.as_deref()).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", page);
    }

    Ok(())
}

// ============================================================================
// Initialization Functions
// ============================================================================

fn setup_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
