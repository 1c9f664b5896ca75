use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Market snapshot of a tracked token, in the shape of CoinGecko `/coins/markets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,                          // CoinGecko coin id, unique in the watchlist
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub image: Option<String>,               // Logo URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,                  // Unit price in the quote currency
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_percentage_24h: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sparkline_in_7d: SparklineData,
}

impl Token {
    /// Build a token with no sparkline or image, mostly useful when seeding a watchlist.
    pub fn new(id: &str, name: &str, symbol: &str, current_price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            image: None,
            current_price,
            price_change_percentage_24h: 0.0,
            sparkline_in_7d: SparklineData::default(),
        }
    }

    /// Value of `amount` units at the current price.
    pub fn value_of(&self, amount: f64) -> f64 {
        amount * self.current_price
    }
}

/// CoinGecko reports `null` market fields for illiquid or freshly listed coins.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparklineData {
    #[serde(default)]
    pub price: Vec<f64>,
}

/// Entry of `/search/trending` (the `item` object).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub data: Option<TrendingMarketData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingMarketData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// 24h change keyed by quote currency
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_change_percentage_24h: HashMap<String, f64>,
}

impl TrendingCoin {
    /// Trending entries carry no sparkline; the next refresh fills it in
    /// once the token is tracked.
    pub fn into_token(self, vs_currency: &str) -> Token {
        let data = self.data.unwrap_or_default();
        Token {
            current_price: data.price,
            price_change_percentage_24h: data
                .price_change_percentage_24h
                .get(vs_currency)
                .copied()
                .unwrap_or_default(),
            image: self.thumb,
            sparkline_in_7d: SparklineData::default(),
            id: self.id,
            name: self.name,
            symbol: self.symbol,
        }
    }
}
