//! Cache key and entry types
//!
//! This module defines the core cache entry structures:
//! - `CacheKey`: Normalized request identity (URL without fragment; GET only)
//! - `CacheEntry`: Immutable response snapshot stored per identity
//! - `ResponseKind`: Origin classification of the snapshotted response

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Cache key identifying a stored response
///
/// The identity of a request is its normalized URL; only GET responses are
/// ever stored, so the method is not part of the key.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheKey {
    /// Normalized URL (fragment stripped, query preserved)
    pub url: String,
}

impl CacheKey {
    /// Normalize a URL into a cache key. Fragments never reach the network
    /// and are dropped from the identity.
    pub fn new(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or(url);
        Self {
            url: without_fragment.to_string(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Origin classification of a response snapshot
///
/// Opaque cross-origin responses cannot be inspected and are never safe to
/// cache under this policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response; fully inspectable
    Basic,
    /// Cross-origin response delivered with CORS headers
    Cors,
    /// Cross-origin response whose body/status cannot be inspected
    Opaque,
}

/// Cache entry representing a stored response snapshot
///
/// Entries are immutable once stored except by explicit overwrite (re-put)
/// on a subsequent fetch.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// HTTP status of the snapshotted response
    pub status: u16,
    /// Content type of the snapshotted response
    pub content_type: String,
    /// Materialized response body
    pub body: Bytes,
    /// Origin classification
    pub kind: ResponseKind,
    /// When this entry was stored
    pub stored_at: SystemTime,
}

impl CacheEntry {
    pub fn new(status: u16, content_type: String, body: Bytes, kind: ResponseKind) -> Self {
        Self {
            status,
            content_type,
            body,
            kind,
            stored_at: SystemTime::now(),
        }
    }

    /// Entry holding a JSON document, used for the pending submission list
    pub fn json(body: Bytes) -> Self {
        Self::new(200, "application/json".to_string(), body, ResponseKind::Basic)
    }

    /// Approximate size of this entry in bytes (body plus metadata)
    pub fn size_bytes(&self) -> usize {
        self.body.len() + self.content_type.len() + std::mem::size_of::<SystemTime>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_create_cache_key_from_url() {
        let key = CacheKey::new("https://example.com/index.html");
        assert_eq!(key.url, "https://example.com/index.html");
    }

    #[test]
    fn test_cache_key_strips_fragment() {
        let key = CacheKey::new("https://example.com/page#pricing");
        assert_eq!(key.url, "https://example.com/page");
    }

    #[test]
    fn test_cache_key_preserves_query() {
        let key = CacheKey::new("/search?q=cache");
        assert_eq!(key.url, "/search?q=cache");
    }

    #[test]
    fn test_identical_urls_produce_equal_keys() {
        let a = CacheKey::new("https://example.com/a");
        let b = CacheKey::new("https://example.com/a#top");
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_key_display_matches_url() {
        let key = CacheKey::new("/styles.css");
        assert_eq!(format!("{}", key), "/styles.css");
    }

    #[test]
    fn test_can_create_cache_entry() {
        let entry = CacheEntry::new(
            200,
            "text/html".to_string(),
            Bytes::from("<html></html>"),
            ResponseKind::Basic,
        );
        assert_eq!(entry.status, 200);
        assert_eq!(entry.content_type, "text/html");
        assert_eq!(entry.body, Bytes::from("<html></html>"));
    }

    #[test]
    fn test_json_entry_has_json_content_type() {
        let entry = CacheEntry::json(Bytes::from("[]"));
        assert_eq!(entry.content_type, "application/json");
        assert_eq!(entry.status, 200);
    }

    #[test]
    fn test_size_bytes_includes_body_length() {
        let entry = CacheEntry::new(
            200,
            "text/plain".to_string(),
            Bytes::from("0123456789"),
            ResponseKind::Basic,
        );
        assert!(entry.size_bytes() >= 10);
    }
}
