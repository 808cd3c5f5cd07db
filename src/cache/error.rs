//! Cache error types
//!
//! No error is recoverable at this layer beyond signaling that storage is
//! unavailable; callers must treat storage as best-effort.

/// Cache error types
#[derive(Debug, Clone)]
pub enum CacheError {
    /// Persistence backend inaccessible
    StorageUnavailable(String),
    /// Serialization/deserialization of a stored payload failed
    SerializationError(String),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            CacheError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_create_cache_error_variants() {
        let _err1 = CacheError::StorageUnavailable("backend offline".to_string());
        let _err2 = CacheError::SerializationError("invalid JSON".to_string());
    }

    #[test]
    fn test_cache_error_implements_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CacheError>();
    }

    #[test]
    fn test_cache_error_display_includes_message() {
        let err = CacheError::StorageUnavailable("quota exceeded".to_string());
        let display_str = format!("{}", err);
        assert!(display_str.contains("Storage unavailable"));
        assert!(display_str.contains("quota exceeded"));
    }

    #[test]
    fn test_cache_error_converts_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{bad json}").unwrap_err();
        let err: CacheError = serde_err.into();
        assert!(matches!(err, CacheError::SerializationError(_)));
    }
}
