// src/watchlist/refresher.rs
//
// Periodic market-data refresh for the tracked tokens. The refresher only
// fetches snapshots and hands them to the store; the portfolio computation
// never depends on timing.

use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

use super::store::WatchlistStore;
use crate::api::MarketDataProvider;
use crate::error::Result;

/// Fetches market data for every tracked token on a fixed interval.
#[derive(Clone)]
pub struct Refresher {
    store: WatchlistStore,
    provider: Arc<dyn MarketDataProvider>,
    interval: Duration,
}

/// Owned by whoever spawned the refresher. Dropping the handle also stops the task.
pub struct RefreshHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signal the task to stop after its current refresh.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Stop and wait for the task to exit.
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            error!("Refresher task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Refresher {
    pub fn new(store: WatchlistStore, provider: Arc<dyn MarketDataProvider>, interval: Duration) -> Self {
        Self {
            store,
            provider,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Refresh once. Returns how many tracked tokens received new data.
    pub async fn refresh_now(&self) -> Result<usize> {
        let ids = self.store.token_ids().await;
        if ids.is_empty() {
            debug!("Watchlist empty, skipping refresh");
            return Ok(0);
        }

        self.store.mark_refresh_started().await;
        let result = match self.provider.fetch_markets(&ids).await {
            Ok(tokens) => self.store.apply_market_data(tokens).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(updated) => {
                info!("🔄 Refreshed market data for {}/{} tokens", updated, ids.len());
                Ok(updated)
            }
            Err(e) => {
                error!("Failed to refresh watchlist tokens: {}", e);
                self.store.mark_refresh_failed(&e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Spawn the polling task. The first refresh happens immediately.
    pub fn spawn(self) -> RefreshHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let period = self.interval;

        info!("Starting watchlist refresher, interval: {:?}", period);

        let task = tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Watchlist refresher received shutdown signal");
                        break;
                    }

                    _ = timer.tick() => {
                        // Failures are already recorded in the store status
                        let _ = self.refresh_now().await;
                    }
                }
            }
        });

        RefreshHandle { shutdown_tx, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchlistError;
    use crate::models::{Token, TrendingCoin};
    use crate::watchlist::persistence::MemoryPersistence;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeProvider {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarketDataProvider for FakeProvider {
        async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<Token>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WatchlistError::Api("rate limited".to_string()));
            }
            Ok(ids.iter().map(|id| Token::new(id, id, id, 42.0)).collect())
        }

        async fn fetch_top_tokens(&self, _page: u32, _per_page: u32) -> Result<Vec<Token>> {
            Ok(Vec::new())
        }

        async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>> {
            Ok(Vec::new())
        }

        async fn search(&self, _query: &str) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    async fn store_with_bitcoin() -> WatchlistStore {
        let store = WatchlistStore::new(Arc::new(MemoryPersistence::new()));
        store.add_token(Token::new("bitcoin", "Bitcoin", "btc", 1.0)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_refresh_now_applies_prices() {
        let store = store_with_bitcoin().await;
        let provider = FakeProvider::new(false);
        let refresher = Refresher::new(store.clone(), provider.clone(), Duration::from_secs(60));

        let updated = refresher.refresh_now().await.unwrap();

        assert_eq!(updated, 1);
        assert_eq!(provider.calls(), 1);
        assert_eq!(store.get_token("bitcoin").await.unwrap().current_price, 42.0);
    }

    #[tokio::test]
    async fn test_refresh_skips_empty_watchlist() {
        let store = WatchlistStore::new(Arc::new(MemoryPersistence::new()));
        let provider = FakeProvider::new(false);
        let refresher = Refresher::new(store, provider.clone(), Duration::from_secs(60));

        assert_eq!(refresher.refresh_now().await.unwrap(), 0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_data() {
        let store = store_with_bitcoin().await;
        let provider = FakeProvider::new(true);
        let refresher = Refresher::new(store.clone(), provider, Duration::from_secs(60));

        assert!(refresher.refresh_now().await.is_err());

        let status = store.status().await;
        assert!(!status.loading);
        assert!(status.last_error.unwrap().contains("rate limited"));
        assert_eq!(store.get_token("bitcoin").await.unwrap().current_price, 1.0);
    }

    #[tokio::test]
    async fn test_spawned_refresher_stops() {
        let store = store_with_bitcoin().await;
        let provider = FakeProvider::new(false);
        let handle = Refresher::new(store, provider.clone(), Duration::from_millis(10)).spawn();

        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.shutdown().await;

        let calls = provider.calls();
        assert!(calls >= 1);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(provider.calls(), calls);
    }
}
