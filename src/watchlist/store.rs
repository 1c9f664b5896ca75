//! Watchlist state store
//!
//! Owns the tracked tokens and the manual holdings. Every mutation is written
//! through the injected [`WatchlistPersistence`] port; the portfolio
//! computation reads a snapshot and stays free of any I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::pagination::{paginate, Page};
use super::persistence::WatchlistPersistence;
use super::search::filter_tokens;
use crate::error::{Result, WatchlistError};
use crate::models::{Portfolio, Token};
use crate::portfolio::aggregate;

/// Persisted watchlist contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistState {
    /// Tracked tokens, in the order they were added
    pub tokens: Vec<Token>,
    /// Token id -> quantity held
    pub holdings: HashMap<String, f64>,
}

impl WatchlistState {
    pub fn holding(&self, id: &str) -> f64 {
        self.holdings.get(id).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tokens.iter().any(|t| t.id == id)
    }
}

/// Progress of the last market-data refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStatus {
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Token row with its holding, as shown in the watchlist table.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistEntry {
    pub token: Token,
    pub holding: f64,
    pub value: f64,
}

/// Thread-safe watchlist shared between the API, the refresher and the display.
#[derive(Clone)]
pub struct WatchlistStore {
    state: Arc<RwLock<WatchlistState>>,
    status: Arc<RwLock<RefreshStatus>>,
    persistence: Arc<dyn WatchlistPersistence>,
}

impl WatchlistStore {
    /// Create an empty store. Call [`WatchlistStore::load`] to read saved state.
    pub fn new(persistence: Arc<dyn WatchlistPersistence>) -> Self {
        Self {
            state: Arc::new(RwLock::new(WatchlistState::default())),
            status: Arc::new(RwLock::new(RefreshStatus::default())),
            persistence,
        }
    }

    /// Read saved state. A missing or unreadable store starts empty.
    pub async fn load(&self) -> Result<()> {
        let loaded = match self.persistence.load().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No saved watchlist, starting with empty watchlist");
                WatchlistState::default()
            }
            Err(e) => {
                warn!("Failed to load saved watchlist, starting empty: {}", e);
                WatchlistState::default()
            }
        };

        let mut state = self.state.write().await;
        *state = loaded;
        info!("📂 Loaded {} tokens from watchlist", state.tokens.len());
        Ok(())
    }

    /// Write `state` while the caller still holds the write guard, so saves
    /// land in the same order as the mutations they follow.
    async fn save(&self, state: &WatchlistState) -> Result<()> {
        self.persistence.save(state).await
    }

    /// Track a token. Returns false if it is already tracked.
    pub async fn add_token(&self, token: Token) -> Result<bool> {
        let mut state = self.state.write().await;

        if state.contains(&token.id) {
            debug!("Token {} already in watchlist", token.id);
            return Ok(false);
        }

        info!("📝 Adding to watchlist: {} ({})", token.name, token.symbol.to_uppercase());
        state.holdings.insert(token.id.clone(), 0.0);
        state.tokens.push(token);

        self.save(&state).await?;
        Ok(true)
    }

    /// Track several tokens at once, skipping ones already present.
    /// Returns how many were added.
    pub async fn add_tokens(&self, tokens: Vec<Token>) -> Result<usize> {
        let mut state = self.state.write().await;
        let mut added = 0;

        for token in tokens {
            if state.contains(&token.id) {
                continue;
            }
            state.holdings.insert(token.id.clone(), 0.0);
            state.tokens.push(token);
            added += 1;
        }

        if added > 0 {
            info!("📝 Added {} tokens to watchlist", added);
        }
        self.save(&state).await?;
        Ok(added)
    }

    /// Stop tracking a token and forget its holding.
    pub async fn remove_token(&self, id: &str) -> Result<Option<Token>> {
        let mut state = self.state.write().await;
        let removed = state
            .tokens
            .iter()
            .position(|t| t.id == id)
            .map(|index| state.tokens.remove(index));
        state.holdings.remove(id);

        if let Some(ref t) = removed {
            info!("🗑️ Removed {} from watchlist", t.symbol.to_uppercase());
        }
        self.save(&state).await?;
        Ok(removed)
    }

    /// Set the quantity held. Amounts must be finite and non-negative.
    pub async fn update_holdings(&self, id: &str, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(WatchlistError::InvalidHoldings {
                id: id.to_string(),
                amount,
            });
        }

        let mut state = self.state.write().await;
        if !state.contains(id) {
            debug!("Holding set for untracked token {}", id);
        }
        state.holdings.insert(id.to_string(), amount);

        self.save(&state).await
    }

    /// Merge a refreshed market snapshot. Tracked tokens missing from the
    /// snapshot keep their last known data; untracked ids are ignored.
    pub async fn apply_market_data(&self, fresh: Vec<Token>) -> Result<usize> {
        let mut by_id: HashMap<String, Token> =
            fresh.into_iter().map(|t| (t.id.clone(), t)).collect();

        let mut state = self.state.write().await;
        let mut updated = 0;
        for token in state.tokens.iter_mut() {
            if let Some(newer) = by_id.remove(&token.id) {
                *token = newer;
                updated += 1;
            }
        }

        if !by_id.is_empty() {
            debug!("Ignoring {} untracked tokens in market snapshot", by_id.len());
        }

        self.save(&state).await?;
        drop(state);

        let mut status = self.status.write().await;
        status.loading = false;
        status.last_error = None;
        status.last_updated = Some(Utc::now());
        Ok(updated)
    }

    pub async fn mark_refresh_started(&self) {
        let mut status = self.status.write().await;
        status.loading = true;
        status.last_error = None;
    }

    pub async fn mark_refresh_failed(&self, error: &str) {
        let mut status = self.status.write().await;
        status.loading = false;
        status.last_error = Some(error.to_string());
    }

    pub async fn status(&self) -> RefreshStatus {
        self.status.read().await.clone()
    }

    pub async fn snapshot(&self) -> WatchlistState {
        self.state.read().await.clone()
    }

    pub async fn tokens(&self) -> Vec<Token> {
        self.state.read().await.tokens.clone()
    }

    pub async fn token_ids(&self) -> Vec<String> {
        self.state.read().await.tokens.iter().map(|t| t.id.clone()).collect()
    }

    pub async fn get_token(&self, id: &str) -> Option<Token> {
        self.state.read().await.tokens.iter().find(|t| t.id == id).cloned()
    }

    pub async fn holdings(&self) -> HashMap<String, f64> {
        self.state.read().await.holdings.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.tokens.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.tokens.is_empty()
    }

    /// Breakdown of the current state.
    pub async fn portfolio(&self) -> Portfolio {
        let state = self.state.read().await;
        aggregate(&state.tokens, &state.holdings)
    }

    /// One page of the watchlist table, optionally filtered by name or symbol.
    pub async fn page(&self, page: usize, per_page: usize, query: Option<&str>) -> Page<WatchlistEntry> {
        let state = self.state.read().await;
        let entries: Vec<WatchlistEntry> = filter_tokens(&state.tokens, query.unwrap_or(""))
            .into_iter()
            .map(|token| {
                let holding = state.holding(&token.id);
                WatchlistEntry {
                    value: crate::portfolio::aggregator::holding_value(token, &state.holdings),
                    token: token.clone(),
                    holding,
                }
            })
            .collect();

        paginate(entries, page, per_page)
    }
}
