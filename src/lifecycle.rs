//! Lifecycle manager
//!
//! Handles install (atomic pre-warm of the static generation), activate
//! (wholesale eviction of superseded generations plus claiming open
//! clients), and typed messages from the front-end. Transitions are driven
//! by external lifecycle signals, never timers.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStore, ResponseKind};
use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::fetch::{timed_fetch, NetworkClient};
use crate::notifications::ClientSurface;
use crate::request::{Request, ResourceKind};

/// Externally driven controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Installing,
    Installed,
    Activating,
    Active,
}

/// Typed payload posted by the front-end
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "CACHE_UPDATED")]
    CacheUpdated,
    #[serde(other)]
    Unknown,
}

pub struct LifecycleManager {
    store: Arc<dyn CacheStore>,
    network: Arc<dyn NetworkClient>,
    surface: Arc<dyn ClientSurface>,
    static_generation: String,
    dynamic_generation: String,
    manifest: Vec<String>,
    slow_threshold: Duration,
    state: Mutex<WorkerState>,
}

impl LifecycleManager {
    pub fn new(
        config: &WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkClient>,
        surface: Arc<dyn ClientSurface>,
    ) -> Self {
        Self {
            store,
            network,
            surface,
            static_generation: config.static_generation(),
            dynamic_generation: config.dynamic_generation(),
            manifest: config.static_assets.clone(),
            slow_threshold: Duration::from_millis(config.slow_request_threshold_ms),
            state: Mutex::new(WorkerState::Installing),
        }
    }

    pub fn state(&self) -> WorkerState {
        *self.state.lock()
    }

    /// Pre-warm the static generation from the fixed manifest.
    ///
    /// All-or-nothing: every asset is fetched first, and entries are stored
    /// only once the whole manifest has succeeded. Any single failure aborts
    /// the install step; the controller remains usable via best-effort
    /// network fallback regardless.
    pub async fn install(&self) -> Result<(), WorkerError> {
        info!(generation = %self.static_generation, "installing");
        self.store.open(&self.static_generation).await?;

        let mut fetched = Vec::with_capacity(self.manifest.len());
        for url in &self.manifest {
            let request = Request::get(url, ResourceKind::Other)
                .map_err(|err| WorkerError::Install(format!("invalid manifest URL {}: {}", url, err)))?;
            let response = timed_fetch(&self.network, &request, self.slow_threshold)
                .await
                .map_err(|err| {
                    WorkerError::Install(format!("failed to fetch {}: {}", url, err))
                })?;
            // An error page or an uninspectable response must never become a
            // permanent cache-first answer for a manifest asset.
            if response.status != 200 || response.kind == ResponseKind::Opaque {
                return Err(WorkerError::Install(format!(
                    "asset {} not cacheable (status {})",
                    url, response.status
                )));
            }
            fetched.push((request.cache_key(), CacheEntry::from(&response)));
        }

        for (key, entry) in fetched {
            self.store.put(&self.static_generation, key, entry).await?;
        }

        *self.state.lock() = WorkerState::Installed;
        info!(
            generation = %self.static_generation,
            assets = self.manifest.len(),
            "static assets cached"
        );
        Ok(())
    }

    /// Evict every generation superseded by the current version, then claim
    /// open client sessions. This is the sole eviction policy: no LRU, no
    /// size bound, no TTL.
    pub async fn activate(&self) -> Result<(), WorkerError> {
        *self.state.lock() = WorkerState::Activating;
        info!("activating");

        let generations = self.store.list_generations().await?;
        for name in generations {
            if name != self.static_generation && name != self.dynamic_generation {
                info!(generation = %name, "deleting old cache generation");
                if let Err(err) = self.store.delete_generation(&name).await {
                    warn!(generation = %name, error = %err, "failed to delete generation");
                }
            }
        }

        self.surface.claim().await;
        *self.state.lock() = WorkerState::Active;
        info!("activated");
        Ok(())
    }

    /// Handle a typed message from the front-end
    pub fn handle_message(&self, message: &ClientMessage) {
        match message {
            ClientMessage::CacheUpdated => {
                info!("cache update message received");
            }
            ClientMessage::Unknown => {
                debug!("ignoring unknown client message");
            }
        }
    }
}
