//! Persistence port for the watchlist state.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::store::WatchlistState;
use crate::error::Result;

/// Read-at-startup, write-on-mutation storage for [`WatchlistState`].
#[async_trait]
pub trait WatchlistPersistence: Send + Sync {
    /// Stored state, or `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<WatchlistState>>;

    async fn save(&self, state: &WatchlistState) -> Result<()>;
}

/// Pretty-printed JSON file on disk.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WatchlistPersistence for JsonFilePersistence {
    async fn load(&self) -> Result<Option<WatchlistState>> {
        if !self.path.exists() {
            debug!("Watchlist file {} not found", self.path.display());
            return Ok(None);
        }

        let data = tokio::fs::read_to_string(&self.path).await?;
        if data.trim().is_empty() {
            return Ok(None);
        }

        let state: WatchlistState = serde_json::from_str(&data)?;
        Ok(Some(state))
    }

    async fn save(&self, state: &WatchlistState) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, data).await?;

        debug!("💾 Saved {} tokens to {}", state.tokens.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the last saved state in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryPersistence {
    saved: Mutex<Option<WatchlistState>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: WatchlistState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
        }
    }

    pub async fn saved(&self) -> Option<WatchlistState> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl WatchlistPersistence for MemoryPersistence {
    async fn load(&self) -> Result<Option<WatchlistState>> {
        Ok(self.saved.lock().await.clone())
    }

    async fn save(&self, state: &WatchlistState) -> Result<()> {
        *self.saved.lock().await = Some(state.clone());
        Ok(())
    }
}
