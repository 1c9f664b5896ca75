//! Request and Response DTOs for the Web API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{PortfolioSlice, Token};
use crate::portfolio::{DonutChart, Sparkline};
use crate::watchlist::RefreshStatus;

// ============================================================================
// Health & Errors
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

// ============================================================================
// Watchlist
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WatchlistQuery {
    pub page: Option<usize>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistRowResponse {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub logo: String,
    pub price: f64,
    pub price_display: String,
    pub change_24h: f64,
    pub change_display: String,
    pub holding: f64,
    pub value: f64,
    pub value_display: String,
    pub sparkline: Option<Sparkline>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistPageResponse {
    pub tokens: Vec<WatchlistRowResponse>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub range: String,
    pub has_previous: bool,
    pub has_next: bool,
}

/// A single token or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AddTokensRequest {
    Many(Vec<Token>),
    One(Token),
}

impl AddTokensRequest {
    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            AddTokensRequest::Many(tokens) => tokens,
            AddTokensRequest::One(token) => vec![token],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddTokensResponse {
    pub added: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHoldingsRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct HoldingResponse {
    pub id: String,
    pub amount: f64,
}

// ============================================================================
// Portfolio
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LegendRowResponse {
    pub label: String,
    pub color: String,
    pub percentage: f64,
    pub percentage_display: String,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub total_value: f64,
    pub total_display: String,
    pub slices: Vec<PortfolioSlice>,
    pub legend: Vec<LegendRowResponse>,
    pub chart: DonutChart,
    pub status: RefreshStatus,
}

// ============================================================================
// Refresh
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub updated: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

// ============================================================================
// Market browsing (add-token list)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Candidate token for the watchlist, not yet tracked.
#[derive(Debug, Serialize)]
pub struct TokenOptionResponse {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub logo: String,
    pub price: f64,
    pub price_display: String,
    pub change_24h: f64,
    pub change_display: String,
    pub token: Token,
}

#[derive(Debug, Serialize)]
pub struct TokenOptionsResponse {
    pub tokens: Vec<TokenOptionResponse>,
    pub page: Option<u32>,
}
