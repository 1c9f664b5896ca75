use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use token_watchlist::api::{CoinGeckoClient, MarketDataProvider};
use token_watchlist::config::Config;
use token_watchlist::portfolio::format_usd;
use token_watchlist::watchlist::{JsonFilePersistence, Refresher, WatchlistStore};
use token_watchlist::web::{server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(Config::load()?);
    info!("Configuration loaded successfully");

    // Watchlist store backed by the JSON file
    let persistence = Arc::new(JsonFilePersistence::new(config.watchlist_path.clone()));
    let store = WatchlistStore::new(persistence);
    store.load().await.context("Failed to load watchlist")?;

    let portfolio = store.portfolio().await;
    info!(
        "Watchlist: {} tokens, portfolio total {}",
        store.len().await,
        format_usd(portfolio.total_value)
    );

    let market: Arc<dyn MarketDataProvider> = Arc::new(
        CoinGeckoClient::from_config(&config).context("Failed to create CoinGecko client")?,
    );
    info!("CoinGecko client initialized ({})", config.coingecko_base_url);

    let refresher = Refresher::new(
        store.clone(),
        market.clone(),
        Duration::from_secs(config.refresh_interval_secs),
    );
    let refresh_handle = refresher.clone().spawn();

    let state = AppState::new(store, refresher, market, config.clone());

    info!("Starting token watchlist v{}...", token_watchlist::VERSION);
    server::start_server(state, config, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    })
    .await?;

    refresh_handle.shutdown().await;
    info!("Token watchlist stopped");
    Ok(())
}
