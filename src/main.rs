//! Command-line entry point.
//!
//! The wallet extension only exists inside a browser, so the binary exposes
//! the parts that run headless: transaction confirmation and market data.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use keychain_broadcast::config::{load_config, AppConfig};
use keychain_broadcast::confirmation::ConfirmationPoller;
use keychain_broadcast::events::EventBus;
use keychain_broadcast::ledger::SidechainClient;
use keychain_broadcast::market::{MarketClient, MarketState};
use keychain_broadcast::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "keychain-broadcast")]
#[command(about = "Sidechain transaction confirmation and market data", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the ledger until a transaction is found or the attempt budget is spent
    Validate {
        /// Transaction id returned by the broadcast
        trx_id: String,

        /// Override the configured number of ledger queries
        #[arg(short, long)]
        max_attempts: Option<u32>,
    },
    /// Fetch exchange settings
    Settings,
    /// Fetch the HIVE price
    Price,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("keychain-broadcast v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Validate { trx_id, max_attempts } => {
            let ledger = Arc::new(SidechainClient::new(config.ledger.clone())?);
            let bus = EventBus::new(config.events.capacity);
            let mut events = bus.subscribe();
            let poller = ConfirmationPoller::from_config(ledger, bus, &config.confirmation);

            let attempts = max_attempts.unwrap_or(config.confirmation.max_attempts);
            poller.validate_transaction_with(&trx_id, attempts).await;

            let event = events.recv().await?;
            println!("{}", serde_json::to_string_pretty(&event.to_json())?);
        }
        Commands::Settings => {
            let client = MarketClient::new(config.market.clone(), Arc::new(MarketState::new()))?;
            client.fetch_settings().await;
            println!("{}", serde_json::to_string_pretty(&client.state().settings().as_deref())?);
        }
        Commands::Price => {
            let client = MarketClient::new(config.market.clone(), Arc::new(MarketState::new()))?;
            client.fetch_hive_price().await;
            println!("{}", client.state().hive_price());
        }
    }

    Ok(())
}
