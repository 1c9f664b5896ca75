use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Invalid holdings amount for {id}: {amount}")]
    InvalidHoldings { id: String, amount: f64 },

    #[error("API error: {0}")]
    Api(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for WatchlistError {
    fn from(e: reqwest::Error) -> Self {
        WatchlistError::Api(e.to_string())
    }
}

impl From<serde_json::Error> for WatchlistError {
    fn from(e: serde_json::Error) -> Self {
        WatchlistError::Persistence(e.to_string())
    }
}

impl From<std::io::Error> for WatchlistError {
    fn from(e: std::io::Error) -> Self {
        WatchlistError::Persistence(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WatchlistError>;
