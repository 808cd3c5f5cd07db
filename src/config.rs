//! Worker configuration
//!
//! YAML-deserializable configuration for the cache controller. Every field
//! has a default so an empty document yields a usable config; deployments
//! override the origin and manifest for their site.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALLOWED_HOSTS, DEFAULT_CACHE_PREFIX, DEFAULT_CACHE_VERSION, DEFAULT_CONTACT_ENDPOINT,
    DEFAULT_ORIGIN, DEFAULT_SITE_NAME, DEFAULT_SLOW_REQUEST_THRESHOLD_MS, DEFAULT_STATIC_ASSETS,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Site name, used as the notification title
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Cache version; a bump supersedes every previous generation
    #[serde(default = "default_version")]
    pub version: String,

    /// Prefix for generation names
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,

    /// The site's own origin ("scheme://host[:port]")
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Pre-warm manifest: exact URLs cached at install time and exempt from
    /// the cross-origin bypass rule
    #[serde(default = "default_static_assets")]
    pub static_assets: Vec<String>,

    /// Cross-origin hosts whose responses may be cached
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,

    /// Remote endpoint accepting JSON-encoded contact-form data
    #[serde(default = "default_contact_endpoint")]
    pub contact_endpoint: String,

    /// Threshold above which a fetch logs a slow-request warning
    #[serde(default = "default_slow_request_threshold_ms")]
    pub slow_request_threshold_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            version: default_version(),
            cache_prefix: default_cache_prefix(),
            origin: default_origin(),
            static_assets: default_static_assets(),
            allowed_hosts: default_allowed_hosts(),
            contact_endpoint: default_contact_endpoint(),
            slow_request_threshold_ms: default_slow_request_threshold_ms(),
        }
    }
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_version() -> String {
    DEFAULT_CACHE_VERSION.to_string()
}

fn default_cache_prefix() -> String {
    DEFAULT_CACHE_PREFIX.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_static_assets() -> Vec<String> {
    DEFAULT_STATIC_ASSETS.iter().map(|s| s.to_string()).collect()
}

fn default_allowed_hosts() -> Vec<String> {
    DEFAULT_ALLOWED_HOSTS.iter().map(|s| s.to_string()).collect()
}

fn default_contact_endpoint() -> String {
    DEFAULT_CONTACT_ENDPOINT.to_string()
}

fn default_slow_request_threshold_ms() -> u64 {
    DEFAULT_SLOW_REQUEST_THRESHOLD_MS
}

impl WorkerConfig {
    /// Name of the static generation for this version
    pub fn static_generation(&self) -> String {
        format!("{}-static-{}", self.cache_prefix, self.version)
    }

    /// Name of the dynamic generation for this version
    pub fn dynamic_generation(&self) -> String {
        format!("{}-dynamic-{}", self.cache_prefix, self.version)
    }

    /// Validate worker configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.origin.is_empty() {
            return Err("origin cannot be empty".to_string());
        }
        if !self.origin.starts_with("http://") && !self.origin.starts_with("https://") {
            return Err(format!("origin must include a scheme: {}", self.origin));
        }
        if self.origin.ends_with('/') {
            return Err(format!("origin must not end with a slash: {}", self.origin));
        }
        if self.version.is_empty() {
            return Err("version cannot be empty".to_string());
        }
        if self.cache_prefix.is_empty() {
            return Err("cache_prefix cannot be empty".to_string());
        }
        if self.contact_endpoint.is_empty() {
            return Err("contact_endpoint cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_create_default_config() {
        let config = WorkerConfig::default();
        assert_eq!(config.version, "v1.0.0");
        assert_eq!(config.cache_prefix, "kasa");
        assert_eq!(config.slow_request_threshold_ms, 1000);
    }

    #[test]
    fn test_can_deserialize_empty_yaml() {
        let config: WorkerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.origin, "https://example.com");
        assert!(!config.static_assets.is_empty());
    }

    #[test]
    fn test_can_deserialize_overridden_fields() {
        let yaml = r#"
origin: https://www.kasa.dev
version: v2.1.0
allowed_hosts:
  - fonts.googleapis.com
"#;
        let config: WorkerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.origin, "https://www.kasa.dev");
        assert_eq!(config.version, "v2.1.0");
        assert_eq!(config.allowed_hosts, vec!["fonts.googleapis.com".to_string()]);
    }

    #[test]
    fn test_generation_names_embed_prefix_and_version() {
        let config = WorkerConfig::default();
        assert_eq!(config.static_generation(), "kasa-static-v1.0.0");
        assert_eq!(config.dynamic_generation(), "kasa-dynamic-v1.0.0");
    }

    #[test]
    fn test_version_bump_changes_generation_names() {
        let mut config = WorkerConfig::default();
        let before = config.static_generation();
        config.version = "v1.0.1".to_string();
        assert_ne!(before, config.static_generation());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(WorkerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_origin_without_scheme() {
        let config = WorkerConfig {
            origin: "example.com".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("scheme"));
    }

    #[test]
    fn test_rejects_origin_with_trailing_slash() {
        let config = WorkerConfig {
            origin: "https://example.com/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_version() {
        let config = WorkerConfig {
            version: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_manifest_includes_offline_critical_pages() {
        let config = WorkerConfig::default();
        assert!(config.static_assets.contains(&"/".to_string()));
        assert!(config.static_assets.contains(&"/index.html".to_string()));
    }
}
