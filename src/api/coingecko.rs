use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::MarketDataProvider;
use crate::config::Config;
use crate::error::{Result, WatchlistError};
use crate::models::{Token, TrendingCoin};

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: String,
    api_key: Option<String>,
    vs_currency: String,
    client: Client,
}

// --- Response Structs ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
struct SearchCoin {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    coins: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    item: TrendingCoin,
}

// --- CoinGecko Client Implementation ---

impl CoinGeckoClient {
    pub fn new(base_url: &str, api_key: Option<String>, vs_currency: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| WatchlistError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            vs_currency: vs_currency.to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.coingecko_base_url,
            config.coingecko_api_key.clone(),
            &config.vs_currency,
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut query: Vec<(&str, String)> = params.to_vec();
        if let Some(key) = &self.api_key {
            query.push(("x_cg_demo_api_key", key.clone()));
        }

        debug!("GET {} ({} params)", url, query.len());

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("CoinGecko {} error: {} - {}", endpoint, status, error_text);
            return Err(WatchlistError::Api(format!("{} returned {}: {}", endpoint, status, error_text)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WatchlistError::Api(format!("Failed to parse {} response: {}", endpoint, e)))
    }

    /// Market data (price, 24h change, 7d sparkline) for the given coin ids.
    pub async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<Token>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", self.vs_currency.clone()),
                ("ids", ids.join(",")),
                ("sparkline", "true".to_string()),
                ("price_change_percentage", "24h".to_string()),
            ],
        )
        .await
    }

    /// Market-cap ordered listing, used to browse tokens to add.
    pub async fn fetch_top_tokens(&self, page: u32, per_page: u32) -> Result<Vec<Token>> {
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", self.vs_currency.clone()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.max(1).to_string()),
                ("sparkline", "true".to_string()),
                ("price_change_percentage", "24h".to_string()),
            ],
        )
        .await
    }

    /// Coin ids matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        let response: SearchResponse = self
            .get_json("/search", &[("query", query.to_string())])
            .await?;
        Ok(response.coins.into_iter().map(|c| c.id).collect())
    }

    pub async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>> {
        let response: TrendingResponse = self.get_json("/search/trending", &[]).await?;
        Ok(response.coins.into_iter().map(|c| c.item).collect())
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<Token>> {
        CoinGeckoClient::fetch_markets(self, ids).await
    }

    async fn fetch_top_tokens(&self, page: u32, per_page: u32) -> Result<Vec<Token>> {
        CoinGeckoClient::fetch_top_tokens(self, page, per_page).await
    }

    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>> {
        CoinGeckoClient::fetch_trending(self).await
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        CoinGeckoClient::search(self, query).await
    }
}
