//! Web API module
//!
//! REST endpoints for managing the watchlist and holdings, plus the portfolio
//! breakdown and its donut chart rendered as SVG.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::api::MarketDataProvider;
use crate::config::Config;
use crate::watchlist::{Refresher, WatchlistStore};

/// Shared application state for all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Tracked tokens and holdings
    pub store: WatchlistStore,
    /// Used for on-demand refreshes
    pub refresher: Refresher,
    /// Market data source, used directly for search
    pub market: Arc<dyn MarketDataProvider>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        store: WatchlistStore,
        refresher: Refresher,
        market: Arc<dyn MarketDataProvider>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            store,
            refresher,
            market,
            config,
        }
    }
}
