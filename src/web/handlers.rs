//! Request handlers for all API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use super::models::*;
use super::AppState;
use crate::api::SEARCH_RESULT_LIMIT;
use crate::error::WatchlistError;
use crate::models::Token;
use crate::portfolio::{format_change, format_percentage, format_usd, legend, render_donut, Sparkline};
use crate::watchlist::{logo_for, random_fallback_logo};

/// Page size of the add-token market listing.
const MARKET_PAGE_SIZE: u32 = 50;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: &str, details: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details,
        }),
    )
}

fn map_error(e: WatchlistError) -> ApiError {
    let status = match &e {
        WatchlistError::TokenNotFound(_) => StatusCode::NOT_FOUND,
        WatchlistError::InvalidHoldings { .. } => StatusCode::BAD_REQUEST,
        WatchlistError::Api(_) => StatusCode::BAD_GATEWAY,
        WatchlistError::Persistence(_) | WatchlistError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Request failed: {}", e);
    }
    api_error(status, &e.to_string(), None)
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Watchlist
// ============================================================================

pub async fn get_watchlist(
    State(state): State<AppState>,
    Query(query): Query<WatchlistQuery>,
) -> Json<WatchlistPageResponse> {
    let page = state
        .store
        .page(
            query.page.unwrap_or(1),
            state.config.tokens_per_page,
            query.query.as_deref(),
        )
        .await;

    let range = page.range_label();
    let has_previous = page.has_previous();
    let has_next = page.has_next();

    let tokens = page
        .items
        .into_iter()
        .map(|entry| {
            let token = &entry.token;
            WatchlistRowResponse {
                id: token.id.clone(),
                name: token.name.clone(),
                symbol: token.symbol.to_uppercase(),
                logo: logo_for(token).to_string(),
                price: token.current_price,
                price_display: format_usd(token.current_price),
                change_24h: token.price_change_percentage_24h,
                change_display: format_change(token.price_change_percentage_24h),
                holding: entry.holding,
                value: entry.value,
                value_display: format_usd(entry.value),
                sparkline: Sparkline::for_table(
                    &token.sparkline_in_7d.price,
                    token.price_change_percentage_24h,
                ),
            }
        })
        .collect();

    Json(WatchlistPageResponse {
        tokens,
        page: page.page,
        total_pages: page.total_pages,
        total: page.total,
        range,
        has_previous,
        has_next,
    })
}

pub async fn add_tokens(
    State(state): State<AppState>,
    Json(request): Json<AddTokensRequest>,
) -> Result<(StatusCode, Json<AddTokensResponse>), ApiError> {
    let tokens = request.into_tokens();
    if tokens.iter().any(|t| t.id.trim().is_empty()) {
        return Err(api_error(StatusCode::BAD_REQUEST, "Token id must not be empty", None));
    }

    let added = state.store.add_tokens(tokens).await.map_err(map_error)?;
    let total = state.store.len().await;

    // Pull prices for the new entries right away instead of waiting for the next tick
    if added > 0 {
        if let Err(e) = state.refresher.refresh_now().await {
            warn!("Initial price fetch after adding tokens failed: {}", e);
        }
    }

    Ok((StatusCode::CREATED, Json(AddTokensResponse { added, total })))
}

pub async fn remove_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.remove_token(&id).await.map_err(map_error)? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(map_error(WatchlistError::TokenNotFound(id))),
    }
}

pub async fn update_holdings(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateHoldingsRequest>,
) -> Result<Json<HoldingResponse>, ApiError> {
    state
        .store
        .update_holdings(&id, request.amount)
        .await
        .map_err(map_error)?;

    info!("Holdings for {} set to {}", id, request.amount);
    Ok(Json(HoldingResponse {
        id,
        amount: request.amount,
    }))
}

pub async fn get_sparkline_svg(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let token = match state.store.get_token(&id).await {
        Some(token) => token,
        None => return Err(map_error(WatchlistError::TokenNotFound(id))),
    };

    // No 7d series yet: nothing to draw
    match Sparkline::for_table(&token.sparkline_in_7d.price, token.price_change_percentage_24h) {
        Some(line) => Ok(([(header::CONTENT_TYPE, "image/svg+xml")], line.to_svg()).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

// ============================================================================
// Portfolio
// ============================================================================

pub async fn get_portfolio(State(state): State<AppState>) -> Json<PortfolioResponse> {
    let portfolio = state.store.portfolio().await;
    let chart = render_donut(&portfolio.slices, portfolio.chart_total());

    let legend_rows = legend(&portfolio)
        .into_iter()
        .map(|entry| LegendRowResponse {
            percentage_display: format_percentage(entry.percentage),
            label: entry.label,
            color: entry.color,
            percentage: entry.percentage,
        })
        .collect();

    Json(PortfolioResponse {
        total_value: portfolio.total_value,
        total_display: format_usd(portfolio.total_value),
        legend: legend_rows,
        chart,
        slices: portfolio.slices,
        status: state.store.status().await,
    })
}

pub async fn get_chart_svg(State(state): State<AppState>) -> impl IntoResponse {
    let portfolio = state.store.portfolio().await;
    let svg = render_donut(&portfolio.slices, portfolio.chart_total()).to_svg();
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

// ============================================================================
// Refresh
// ============================================================================

pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, ApiError> {
    let updated = state.refresher.refresh_now().await.map_err(map_error)?;
    let status = state.store.status().await;

    Ok(Json(RefreshResponse {
        updated,
        last_updated: status.last_updated,
    }))
}

// ============================================================================
// Market browsing
// ============================================================================

/// Shape market tokens for the add-token list, leaving out tracked ones.
fn token_options(tokens: Vec<Token>, tracked: &HashSet<String>) -> Vec<TokenOptionResponse> {
    let mut rng = rand::thread_rng();

    tokens
        .into_iter()
        .filter(|token| !tracked.contains(&token.id))
        .map(|token| {
            let logo = match token.image.as_deref() {
                Some(url) if !url.trim().is_empty() => url.to_string(),
                _ => random_fallback_logo(&mut rng).to_string(),
            };
            TokenOptionResponse {
                id: token.id.clone(),
                name: token.name.clone(),
                symbol: token.symbol.to_uppercase(),
                logo,
                price: token.current_price,
                price_display: format_usd(token.current_price),
                change_24h: token.price_change_percentage_24h,
                change_display: format_change(token.price_change_percentage_24h),
                token,
            }
        })
        .collect()
}

async fn tracked_ids(state: &AppState) -> HashSet<String> {
    state.store.token_ids().await.into_iter().collect()
}

pub async fn browse_tokens(
    State(state): State<AppState>,
    Query(query): Query<MarketQuery>,
) -> Result<Json<TokenOptionsResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(MARKET_PAGE_SIZE)
        .clamp(1, SEARCH_RESULT_LIMIT as u32);

    let tokens = state
        .market
        .fetch_top_tokens(page, per_page)
        .await
        .map_err(map_error)?;
    let tracked = tracked_ids(&state).await;

    Ok(Json(TokenOptionsResponse {
        tokens: token_options(tokens, &tracked),
        page: Some(page),
    }))
}

pub async fn get_trending(
    State(state): State<AppState>,
) -> Result<Json<TokenOptionsResponse>, ApiError> {
    let trending = state.market.fetch_trending().await.map_err(map_error)?;
    let tokens: Vec<Token> = trending
        .into_iter()
        .map(|coin| coin.into_token(&state.config.vs_currency))
        .collect();
    let tracked = tracked_ids(&state).await;

    Ok(Json(TokenOptionsResponse {
        tokens: token_options(tokens, &tracked),
        page: None,
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TokenOptionsResponse>, ApiError> {
    let query = query.query.trim();
    if query.is_empty() {
        return Ok(Json(TokenOptionsResponse {
            tokens: Vec::new(),
            page: None,
        }));
    }

    let tokens = state.market.search_tokens(query).await.map_err(map_error)?;
    debug!("Search '{}' matched {} tokens", query, tokens.len());
    let tracked = tracked_ids(&state).await;

    Ok(Json(TokenOptionsResponse {
        tokens: token_options(tokens, &tracked),
        page: None,
    }))
}
