// Error types module

use std::fmt;

/// Centralized error type for the worker
///
/// Categorizes errors into 4 main types matching the failure surfaces of the
/// controller: persistence, network, install pre-warm, and queued delivery.
/// None of these is ever surfaced to the requesting front-end; foreground
/// failures become fallback responses instead.
#[derive(Debug, Clone)]
pub enum WorkerError {
    /// Persistence backend inaccessible (degrade to pass-through, never fatal)
    Storage(String),

    /// Network fetch rejected or timed out
    Network(String),

    /// Pre-warm manifest incomplete; the controller still activates
    Install(String),

    /// Queued submission send failed; the batch remains queued
    Delivery(String),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::Storage(msg) => write!(f, "Storage error: {}", msg),
            WorkerError::Network(msg) => write!(f, "Network error: {}", msg),
            WorkerError::Install(msg) => write!(f, "Install failed: {}", msg),
            WorkerError::Delivery(msg) => write!(f, "Delivery failed: {}", msg),
        }
    }
}

impl std::error::Error for WorkerError {}

impl From<crate::cache::CacheError> for WorkerError {
    fn from(err: crate::cache::CacheError) -> Self {
        WorkerError::Storage(err.to_string())
    }
}

impl From<crate::fetch::NetworkError> for WorkerError {
    fn from(err: crate::fetch::NetworkError) -> Self {
        WorkerError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_create_worker_error_variants() {
        let _err1 = WorkerError::Storage("backend gone".to_string());
        let _err2 = WorkerError::Network("connection refused".to_string());
        let _err3 = WorkerError::Install("manifest fetch failed".to_string());
        let _err4 = WorkerError::Delivery("endpoint unreachable".to_string());
    }

    #[test]
    fn test_worker_error_implements_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<WorkerError>();
    }

    #[test]
    fn test_worker_error_display_includes_message() {
        let err = WorkerError::Install("asset /styles.css failed".to_string());
        let display_str = format!("{}", err);
        assert!(display_str.contains("Install failed"));
        assert!(display_str.contains("/styles.css"));
    }

    #[test]
    fn test_worker_error_converts_from_cache_error() {
        let cache_err = crate::cache::CacheError::StorageUnavailable("down".to_string());
        let err: WorkerError = cache_err.into();
        assert!(matches!(err, WorkerError::Storage(_)));
    }

    #[test]
    fn test_worker_error_converts_from_network_error() {
        let net_err = crate::fetch::NetworkError::ConnectionFailed("refused".to_string());
        let err: WorkerError = net_err.into();
        assert!(matches!(err, WorkerError::Network(_)));
    }
}
