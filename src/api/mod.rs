pub mod coingecko;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Token, TrendingCoin};

pub use coingecko::CoinGeckoClient;

/// Upper bound on ids resolved per search, the `/coins/markets` page limit.
pub const SEARCH_RESULT_LIMIT: usize = 250;

/// Source of market snapshots for tracked tokens and for browsing new ones.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current market data for `ids`. An empty id list returns an empty snapshot.
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<Token>>;

    /// Market-cap ordered listing, 1-based pages.
    async fn fetch_top_tokens(&self, page: u32, per_page: u32) -> Result<Vec<Token>>;

    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>>;

    /// Coin ids matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<String>>;

    /// Search, then resolve the matching ids to full market snapshots.
    async fn search_tokens(&self, query: &str) -> Result<Vec<Token>> {
        let mut ids = self.search(query).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        ids.truncate(SEARCH_RESULT_LIMIT);
        self.fetch_markets(&ids).await
    }
}
