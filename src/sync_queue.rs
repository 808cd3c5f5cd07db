//! Deferred submission queue
//!
//! Persists form submissions that failed to send and replays them when an
//! external background-sync trigger fires. The queue lives as a JSON list
//! under a fixed key in the dynamic generation, so it survives controller
//! restarts alongside the rest of the cache.

use bytes::Bytes;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::{CacheEntry, CacheError, CacheKey, CacheStore};
use crate::config::WorkerConfig;
use crate::constants::PENDING_SUBMISSIONS_PATH;
use crate::error::WorkerError;
use crate::fetch::NetworkClient;

/// A queued form submission awaiting delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSubmission {
    /// Destination endpoint for the JSON payload
    pub endpoint: String,
    /// The submitted form data
    pub form: serde_json::Value,
}

pub struct SubmissionQueue {
    store: Arc<dyn CacheStore>,
    network: Arc<dyn NetworkClient>,
    generation: String,
}

impl SubmissionQueue {
    pub fn new(
        config: &WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkClient>,
    ) -> Self {
        Self {
            store,
            network,
            generation: config.dynamic_generation(),
        }
    }

    fn queue_key() -> CacheKey {
        CacheKey::new(PENDING_SUBMISSIONS_PATH)
    }

    /// Read the persisted list; absent means empty
    pub async fn pending(&self) -> Result<Vec<PendingSubmission>, CacheError> {
        match self
            .store
            .match_in(&self.generation, &Self::queue_key())
            .await?
        {
            Some(entry) => Ok(serde_json::from_slice(&entry.body)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a submission to the persisted list
    pub async fn enqueue(&self, submission: PendingSubmission) -> Result<(), WorkerError> {
        let mut pending = self.pending().await?;
        pending.push(submission);
        let body = serde_json::to_vec(&pending).map_err(CacheError::from)?;
        self.store
            .put(&self.generation, Self::queue_key(), CacheEntry::json(Bytes::from(body)))
            .await?;
        Ok(())
    }

    /// Attempt to deliver every queued submission, one independent network
    /// call per entry. The persisted list is deleted only if **all**
    /// deliveries succeed; a single failure leaves the entire batch queued
    /// for the next flush, including entries that already succeeded in this
    /// pass (at-least-once delivery, not exactly-once).
    pub async fn flush(&self) -> Result<usize, WorkerError> {
        let pending = self.pending().await?;
        if pending.is_empty() {
            return Ok(0);
        }

        let deliveries = pending
            .iter()
            .map(|submission| self.network.post_json(&submission.endpoint, &submission.form));
        let results = join_all(deliveries).await;

        if let Some(err) = results.into_iter().find_map(|result| result.err()) {
            warn!(
                queued = pending.len(),
                error = %err,
                "submission delivery failed, batch remains queued"
            );
            return Err(WorkerError::Delivery(err.to_string()));
        }

        self.store
            .delete(&self.generation, &Self::queue_key())
            .await?;
        info!(delivered = pending.len(), "pending submissions delivered");
        Ok(pending.len())
    }
}
