//! Offline fallback generator
//!
//! Produces a synthetic response when both cache and network have failed.
//! This function never fails; its only dependency is a single best-effort
//! cache lookup for the pre-cached offline page.

use bytes::Bytes;
use std::sync::Arc;

use crate::cache::{CacheKey, CacheStore};
use crate::constants::{
    OFFLINE_DOCUMENT_BODY, OFFLINE_IMAGE_SVG, OFFLINE_PAGE_PATH, OFFLINE_RESOURCE_BODY,
};
use crate::fetch::{ResponseSource, ServedResponse};
use crate::request::ResourceKind;

/// Synthetic substitute for a request whose cache and network paths both
/// failed, keyed by resource kind.
pub async fn fallback_for(kind: ResourceKind, store: &Arc<dyn CacheStore>) -> ServedResponse {
    match kind {
        ResourceKind::Document => {
            // Prefer the pre-cached offline page over the plain-text 503.
            if let Ok(Some(entry)) = store.match_any(&CacheKey::new(OFFLINE_PAGE_PATH)).await {
                return ServedResponse::from_entry(entry, ResponseSource::Fallback);
            }
            ServedResponse::text(503, OFFLINE_DOCUMENT_BODY)
        }
        ResourceKind::Image => ServedResponse {
            status: 200,
            content_type: "image/svg+xml".to_string(),
            body: Bytes::from_static(OFFLINE_IMAGE_SVG.as_bytes()),
            source: ResponseSource::Fallback,
        },
        _ => ServedResponse::text(503, OFFLINE_RESOURCE_BODY),
    }
}
