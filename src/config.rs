use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub coingecko_api_key: Option<String>, // Demo key, sent as x_cg_demo_api_key
    pub coingecko_base_url: String,
    pub vs_currency: String,

    pub watchlist_path: PathBuf,
    pub refresh_interval_secs: u64,
    pub tokens_per_page: usize,

    pub api_host: Option<String>,
    pub api_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coingecko_api_key: None,
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            vs_currency: "usd".to_string(),
            watchlist_path: PathBuf::from("data/watchlist.json"),
            refresh_interval_secs: 60,
            tokens_per_page: 10,
            api_host: None,
            api_port: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let refresh_interval_secs: u64 = env::var("REFRESH_INTERVAL_SECS")
            .unwrap_or_else(|_| defaults.refresh_interval_secs.to_string())
            .parse()
            .context("Failed to parse REFRESH_INTERVAL_SECS")?;
        if refresh_interval_secs == 0 {
            bail!("REFRESH_INTERVAL_SECS must be greater than zero");
        }

        let tokens_per_page: usize = env::var("TOKENS_PER_PAGE")
            .unwrap_or_else(|_| defaults.tokens_per_page.to_string())
            .parse()
            .context("Failed to parse TOKENS_PER_PAGE")?;
        if tokens_per_page == 0 {
            bail!("TOKENS_PER_PAGE must be greater than zero");
        }

        let api_port = match env::var("API_PORT") {
            Ok(port) => Some(port.trim().parse().context("Failed to parse API_PORT")?),
            Err(_) => None,
        };

        Ok(Self {
            coingecko_api_key: env::var("COINGECKO_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            coingecko_base_url: env::var("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            vs_currency: env::var("VS_CURRENCY")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.vs_currency),

            watchlist_path: env::var("WATCHLIST_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.watchlist_path),
            refresh_interval_secs,
            tokens_per_page,

            api_host: env::var("API_HOST").ok(),
            api_port,
        })
    }
}
