//! Token Watchlist Library
//!
//! Tracks a watchlist of crypto tokens with manually entered holdings and
//! turns it into a portfolio breakdown: ranked slices, a legend and a donut
//! chart rendered as SVG path geometry.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod portfolio;
pub mod watchlist;
pub mod web;

// Re-export commonly used items for easier access
pub use error::{Result, WatchlistError};
pub use models::{LegendEntry, Portfolio, PortfolioSlice, Token};
pub use portfolio::{aggregate, render_donut, DonutArc, DonutChart};
pub use watchlist::{Refresher, WatchlistStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
