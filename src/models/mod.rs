pub mod token;
pub mod portfolio;

// Re-export commonly used types
pub use portfolio::{LegendEntry, Portfolio, PortfolioSlice};
pub use token::{SparklineData, Token, TrendingCoin, TrendingMarketData};
