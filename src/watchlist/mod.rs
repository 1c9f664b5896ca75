//! Token Watchlist Module
//!
//! Tracked tokens and manual holdings, their persistence, the periodic
//! market-data refresh, and the helpers the watchlist table is built from.

pub mod logos;
pub mod pagination;
pub mod persistence;
pub mod refresher;
pub mod search;
pub mod store;

pub use logos::{fallback_logo_for, logo_for, random_fallback_logo, FALLBACK_LOGOS};
pub use pagination::{paginate, Page};
pub use persistence::{JsonFilePersistence, MemoryPersistence, WatchlistPersistence};
pub use refresher::{RefreshHandle, Refresher};
pub use search::filter_tokens;
pub use store::{RefreshStatus, WatchlistEntry, WatchlistState, WatchlistStore};
