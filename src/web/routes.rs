//! API route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;
use super::AppState;

/// Create all API routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))

        // Watchlist
        .route("/api/watchlist", get(handlers::get_watchlist))
        .route("/api/watchlist/tokens", post(handlers::add_tokens))
        .route("/api/watchlist/tokens/:id", delete(handlers::remove_token))
        .route("/api/watchlist/tokens/:id/sparkline.svg", get(handlers::get_sparkline_svg))
        .route("/api/holdings/:id", put(handlers::update_holdings))

        // Portfolio
        .route("/api/portfolio", get(handlers::get_portfolio))
        .route("/api/portfolio/chart.svg", get(handlers::get_chart_svg))

        // Market data
        .route("/api/refresh", post(handlers::refresh))
        .route("/api/tokens", get(handlers::browse_tokens))
        .route("/api/tokens/trending", get(handlers::get_trending))
        .route("/api/search", get(handlers::search))

        // Add state to all routes
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MarketDataProvider;
    use crate::config::Config;
    use crate::error::Result;
    use crate::models::{Token, TrendingCoin, TrendingMarketData};
    use crate::watchlist::{MemoryPersistence, Refresher, WatchlistStore, FALLBACK_LOGOS};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    struct StaticMarket;

    #[async_trait]
    impl MarketDataProvider for StaticMarket {
        async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<Token>> {
            Ok(ids
                .iter()
                .map(|id| match id.as_str() {
                    "bitcoin" => bitcoin(),
                    "ethereum" => Token::new("ethereum", "Ethereum", "eth", 3000.0),
                    other => Token::new(other, other, other, 1.0),
                })
                .collect())
        }

        async fn fetch_top_tokens(&self, _page: u32, _per_page: u32) -> Result<Vec<Token>> {
            Ok(vec![bitcoin(), Token::new("ethereum", "Ethereum", "eth", 3000.0)])
        }

        async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>> {
            Ok(vec![TrendingCoin {
                id: "pepe".to_string(),
                name: "Pepe".to_string(),
                symbol: "pepe".to_string(),
                market_cap_rank: Some(30),
                thumb: Some("https://example.com/pepe.png".to_string()),
                data: Some(TrendingMarketData {
                    price: 0.5,
                    price_change_percentage_24h: HashMap::from([("usd".to_string(), -2.0)]),
                }),
            }])
        }

        async fn search(&self, query: &str) -> Result<Vec<String>> {
            Ok(vec![query.to_lowercase()])
        }
    }

    fn bitcoin() -> Token {
        let mut token = Token::new("bitcoin", "Bitcoin", "btc", 50000.0);
        token.sparkline_in_7d.price = vec![48000.0, 49000.0, 50000.0];
        token
    }

    fn app() -> Router {
        let store = WatchlistStore::new(Arc::new(MemoryPersistence::new()));
        let market: Arc<dyn MarketDataProvider> = Arc::new(StaticMarket);
        let refresher = Refresher::new(store.clone(), market.clone(), Duration::from_secs(60));
        let state = AppState::new(store, refresher, market, Arc::new(Config::default()));
        create_routes(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_empty_portfolio_is_placeholder() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/portfolio", None).await;
        assert_eq!(status, StatusCode::OK);

        let body = json(&body);
        assert_eq!(body["total_value"], 0.0);
        assert_eq!(body["chart"]["kind"], "placeholder");
        assert!(body["slices"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_tokens_set_holdings_and_view_portfolio() {
        let app = app();

        let tokens = serde_json::json!([
            { "id": "bitcoin", "name": "Bitcoin", "symbol": "btc" },
            { "id": "ethereum", "name": "Ethereum", "symbol": "eth" }
        ]);
        let (status, body) = send(&app, "POST", "/api/watchlist/tokens", Some(tokens)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json(&body)["added"], 2);

        let (status, _) = send(&app, "PUT", "/api/holdings/bitcoin", Some(serde_json::json!({ "amount": 1.0 }))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "PUT", "/api/holdings/ethereum", Some(serde_json::json!({ "amount": 2.0 }))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/api/portfolio", None).await;
        let body = json(&body);
        assert_eq!(body["total_value"], 56000.0);
        assert_eq!(body["total_display"], "$56,000.00");
        assert_eq!(body["slices"][0]["name"], "Bitcoin");
        assert_eq!(body["legend"][0]["label"], "Bitcoin (BTC)");
        assert_eq!(body["legend"][0]["percentage_display"], "89.3%");
        assert_eq!(body["chart"]["kind"], "arcs");
        assert_eq!(body["chart"]["arcs"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, "GET", "/api/watchlist?page=1", None).await;
        let body = json(&body);
        assert_eq!(body["total"], 2);
        assert_eq!(body["range"], "1-2 of 2");
        assert_eq!(body["tokens"][0]["value_display"], "$50,000.00");
    }

    #[tokio::test]
    async fn test_invalid_holdings_rejected() {
        let app = app();
        let (status, body) = send(&app, "PUT", "/api/holdings/bitcoin", Some(serde_json::json!({ "amount": -5.0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json(&body)["error"].as_str().unwrap().contains("Invalid holdings"));
    }

    #[tokio::test]
    async fn test_remove_unknown_token() {
        let app = app();
        let (status, _) = send(&app, "DELETE", "/api/watchlist/tokens/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chart_svg() {
        let app = app();
        let response = app
            .oneshot(Request::builder().uri("/api/portfolio/chart.svg").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().starts_with("<svg"));
    }

    #[tokio::test]
    async fn test_search() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/search?query=SOL", None).await;
        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["tokens"][0]["id"], "sol");
        assert_eq!(body["tokens"][0]["price"], 1.0);

        let (_, body) = send(&app, "GET", "/api/search?query=%20", None).await;
        assert!(json(&body)["tokens"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_browse_excludes_tracked_tokens() {
        let app = app();
        let tokens = serde_json::json!({ "id": "bitcoin", "name": "Bitcoin", "symbol": "btc" });
        send(&app, "POST", "/api/watchlist/tokens", Some(tokens)).await;

        let (status, body) = send(&app, "GET", "/api/tokens?page=0", None).await;
        assert_eq!(status, StatusCode::OK);

        let body = json(&body);
        assert_eq!(body["page"], 1);
        let options = body["tokens"].as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["id"], "ethereum");
        assert_eq!(options[0]["symbol"], "ETH");
        let logo = options[0]["logo"].as_str().unwrap();
        assert!(FALLBACK_LOGOS.contains(&logo));
    }

    #[tokio::test]
    async fn test_trending_tokens() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/tokens/trending", None).await;
        assert_eq!(status, StatusCode::OK);

        let body = json(&body);
        assert_eq!(body["tokens"][0]["id"], "pepe");
        assert_eq!(body["tokens"][0]["price"], 0.5);
        assert_eq!(body["tokens"][0]["change_display"], "-2.00%");
        assert_eq!(body["tokens"][0]["logo"], "https://example.com/pepe.png");
    }

    #[tokio::test]
    async fn test_token_sparkline_svg() {
        let app = app();
        let tokens = serde_json::json!([
            { "id": "bitcoin", "name": "Bitcoin", "symbol": "btc" },
            { "id": "ethereum", "name": "Ethereum", "symbol": "eth" }
        ]);
        send(&app, "POST", "/api/watchlist/tokens", Some(tokens)).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/watchlist/tokens/bitcoin/sparkline.svg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("<path"));

        let (status, _) = send(&app, "GET", "/api/watchlist/tokens/ethereum/sparkline.svg", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/watchlist/tokens/nope/sparkline.svg", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
