//! Fetch interceptor
//!
//! The control loop that decides, per intercepted request, whether to serve
//! from cache, fetch from the network, refresh the cache in the background,
//! or fall back to a synthetic offline response.
//!
//! # Design
//!
//! `handle` returns a structured `FetchDecision` instead of writing to any
//! session: `Bypass` means the request was never ours to answer and must pass
//! through to the default network stack unmodified; `Respond` carries the
//! substitute response. The caller never observes an error from this layer.

pub mod network;

pub use network::{HttpNetworkClient, NetworkClient, NetworkError, NetworkResponse};

use bytes::Bytes;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStore};
use crate::classifier::Classifier;
use crate::config::WorkerConfig;
use crate::fallback;
use crate::request::Request;

/// Where a served response came from (observability only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
    Fallback,
}

/// Response handed back to the front-end
#[derive(Debug, Clone)]
pub struct ServedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
    pub source: ResponseSource,
}

impl ServedResponse {
    pub fn from_entry(entry: CacheEntry, source: ResponseSource) -> Self {
        Self {
            status: entry.status,
            content_type: entry.content_type,
            body: entry.body,
            source,
        }
    }

    pub fn from_network(response: NetworkResponse) -> Self {
        Self {
            status: response.status,
            content_type: response.content_type,
            body: response.body,
            source: ResponseSource::Network,
        }
    }

    /// Plain-text synthetic response
    pub fn text(status: u16, body: &'static str) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: Bytes::from_static(body.as_bytes()),
            source: ResponseSource::Fallback,
        }
    }
}

/// Outcome of intercepting one request
#[derive(Debug)]
pub enum FetchDecision {
    /// Not handled; the request passes through to the default network stack
    Bypass,
    /// Substitute response supplied by the controller
    Respond(ServedResponse),
}

/// Perform a network fetch, logging a diagnostic warning when it exceeds the
/// slow-request threshold. Timing never changes the returned result.
pub(crate) async fn timed_fetch(
    network: &Arc<dyn NetworkClient>,
    request: &Request,
    slow_threshold: Duration,
) -> Result<NetworkResponse, NetworkError> {
    let start = Instant::now();
    let result = network.fetch(request).await;
    let elapsed = start.elapsed();
    if elapsed > slow_threshold {
        warn!(
            url = %request.url,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow request detected"
        );
    }
    result
}

/// Best-effort background refresh of a document entry in the static
/// generation. Failures are swallowed; the previously served cached response
/// stands either way.
pub(crate) async fn refresh_document(
    store: Arc<dyn CacheStore>,
    network: Arc<dyn NetworkClient>,
    static_generation: String,
    request: Request,
    slow_threshold: Duration,
) {
    match timed_fetch(&network, &request, slow_threshold).await {
        Ok(response) if response.status == 200 && response.kind != crate::cache::ResponseKind::Opaque => {
            let key = request.cache_key();
            if let Err(err) = store
                .put(&static_generation, key, CacheEntry::from(&response))
                .await
            {
                warn!(url = %request.url, error = %err, "failed to store refreshed document");
            } else {
                debug!(url = %request.url, "document refreshed in background");
            }
        }
        Ok(response) => {
            debug!(
                url = %request.url,
                status = response.status,
                "background refresh response not stored"
            );
        }
        Err(err) => {
            // Network down or server error: indistinguishable here, both
            // leave the cached entry unchanged.
            debug!(url = %request.url, error = %err, "background refresh failed");
        }
    }
}

/// The per-request control loop
pub struct FetchInterceptor {
    store: Arc<dyn CacheStore>,
    network: Arc<dyn NetworkClient>,
    classifier: Classifier,
    static_generation: String,
    dynamic_generation: String,
    slow_threshold: Duration,
}

impl FetchInterceptor {
    pub fn new(
        config: &WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkClient>,
    ) -> Self {
        Self {
            store,
            network,
            classifier: Classifier::from_config(config),
            static_generation: config.static_generation(),
            dynamic_generation: config.dynamic_generation(),
            slow_threshold: Duration::from_millis(config.slow_request_threshold_ms),
        }
    }

    /// Decide the response for one intercepted request.
    ///
    /// Cache hit: return the cached entry immediately; document hits
    /// additionally spawn a detached background refresh. Cache miss: fetch
    /// from the network, storing cacheable eligible responses into the
    /// dynamic generation. Total failure: synthetic fallback.
    pub async fn handle(&self, request: Request) -> FetchDecision {
        let decision = self.classifier.classify(&request);
        if decision.is_bypass() {
            return FetchDecision::Bypass;
        }

        let key = request.cache_key();
        let cached = match self.store.match_any(&key).await {
            Ok(cached) => cached,
            Err(err) => {
                // Storage is best-effort: degrade to the network path.
                warn!(url = %request.url, error = %err, "cache lookup failed");
                None
            }
        };

        if let Some(entry) = cached {
            if decision.is_document() {
                let store = self.store.clone();
                let network = self.network.clone();
                let static_generation = self.static_generation.clone();
                let slow_threshold = self.slow_threshold;
                let refresh_request = request.clone();
                // Detached on purpose: the caller never blocks on the refresh
                // and an aborted foreground request does not cancel it.
                tokio::spawn(async move {
                    refresh_document(
                        store,
                        network,
                        static_generation,
                        refresh_request,
                        slow_threshold,
                    )
                    .await;
                });
            }
            return FetchDecision::Respond(ServedResponse::from_entry(
                entry,
                ResponseSource::Cache,
            ));
        }

        match timed_fetch(&self.network, &request, self.slow_threshold).await {
            Ok(response) => {
                if response.is_cacheable() && decision.cache_eligible {
                    if let Err(err) = self
                        .store
                        .put(&self.dynamic_generation, key, CacheEntry::from(&response))
                        .await
                    {
                        warn!(url = %request.url, error = %err, "failed to store response");
                    }
                }
                FetchDecision::Respond(ServedResponse::from_network(response))
            }
            Err(err) => {
                debug!(url = %request.url, error = %err, "network fetch failed, serving fallback");
                FetchDecision::Respond(
                    fallback::fallback_for(decision.kind, &self.store).await,
                )
            }
        }
    }
}
