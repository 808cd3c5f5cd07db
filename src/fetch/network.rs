//! Network boundary
//!
//! `NetworkClient` is the seam between the controller and the default
//! network stack. The interceptor and lifecycle manager only ever see this
//! trait, so tests substitute scripted fakes for the real HTTP client.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::cache::{CacheEntry, ResponseKind};
use crate::constants::DEFAULT_FETCH_TIMEOUT_SECS;
use crate::request::Request;

/// Network error types
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Fetch rejected (DNS failure, connection refused, protocol error)
    ConnectionFailed(String),
    /// Fetch timed out
    Timeout,
    /// Request URL could not be turned into an absolute network URL
    InvalidUrl(String),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            NetworkError::Timeout => write!(f, "Request timed out"),
            NetworkError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Response snapshot as received from the network
///
/// The body is materialized into a buffer at this boundary so the caller can
/// both store and return it without single-consumption concerns.
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
    pub kind: ResponseKind,
}

impl NetworkResponse {
    /// Only 200 responses of basic (same-origin) type may be stored
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}

impl From<&NetworkResponse> for CacheEntry {
    fn from(response: &NetworkResponse) -> Self {
        CacheEntry::new(
            response.status,
            response.content_type.clone(),
            response.body.clone(),
            response.kind,
        )
    }
}

/// Client for performing real network calls
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Perform the request against the network, materializing the body
    async fn fetch(&self, request: &Request) -> Result<NetworkResponse, NetworkError>;

    /// Deliver a JSON payload to a remote endpoint.
    /// Success is any non-throwing response, regardless of status.
    async fn post_json(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<(), NetworkError>;
}

/// Real network client backed by reqwest
pub struct HttpNetworkClient {
    client: reqwest::Client,
    origin: String,
}

impl HttpNetworkClient {
    pub fn new(origin: impl Into<String>) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|err| NetworkError::ConnectionFailed(err.to_string()))?;
        Ok(Self {
            client,
            origin: origin.into(),
        })
    }

    /// Resolve a possibly root-relative request URL against the site origin
    fn absolute_url(&self, request: &Request) -> String {
        if request.is_relative() {
            format!("{}{}", self.origin, request.url)
        } else {
            request.url_str()
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout
    } else {
        NetworkError::ConnectionFailed(err.to_string())
    }
}

#[async_trait]
impl NetworkClient for HttpNetworkClient {
    async fn fetch(&self, request: &Request) -> Result<NetworkResponse, NetworkError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|err| NetworkError::InvalidUrl(err.to_string()))?;
        let url = self.absolute_url(request);

        let response = self
            .client
            .request(method, &url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let same_origin =
            request.is_relative() || request.origin().as_deref() == Some(self.origin.as_str());
        let kind = if same_origin {
            ResponseKind::Basic
        } else if response
            .headers()
            .contains_key(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        {
            ResponseKind::Cors
        } else {
            ResponseKind::Opaque
        };

        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(NetworkResponse {
            status,
            content_type,
            body,
            kind,
        })
    }

    async fn post_json(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<(), NetworkError> {
        self.client
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ResourceKind;

    #[test]
    fn test_network_error_display() {
        let err = NetworkError::ConnectionFailed("refused".to_string());
        assert!(format!("{}", err).contains("refused"));
        assert!(format!("{}", NetworkError::Timeout).contains("timed out"));
    }

    #[test]
    fn test_basic_200_response_is_cacheable() {
        let response = NetworkResponse {
            status: 200,
            content_type: "text/html".to_string(),
            body: Bytes::from("<html></html>"),
            kind: ResponseKind::Basic,
        };
        assert!(response.is_cacheable());
    }

    #[test]
    fn test_opaque_response_is_never_cacheable() {
        let response = NetworkResponse {
            status: 200,
            content_type: String::new(),
            body: Bytes::new(),
            kind: ResponseKind::Opaque,
        };
        assert!(!response.is_cacheable());
    }

    #[test]
    fn test_redirect_status_is_not_cacheable() {
        let response = NetworkResponse {
            status: 301,
            content_type: "text/html".to_string(),
            body: Bytes::new(),
            kind: ResponseKind::Basic,
        };
        assert!(!response.is_cacheable());
    }

    #[test]
    fn test_cache_entry_snapshot_copies_fields() {
        let response = NetworkResponse {
            status: 200,
            content_type: "text/css".to_string(),
            body: Bytes::from("body{}"),
            kind: ResponseKind::Basic,
        };
        let entry = CacheEntry::from(&response);
        assert_eq!(entry.status, 200);
        assert_eq!(entry.content_type, "text/css");
        assert_eq!(entry.body, Bytes::from("body{}"));
    }

    #[test]
    fn test_absolute_url_resolves_relative_against_origin() {
        let client = HttpNetworkClient::new("https://example.com").unwrap();
        let request = Request::get("/styles.css", ResourceKind::Style).unwrap();
        assert_eq!(client.absolute_url(&request), "https://example.com/styles.css");
    }

    #[test]
    fn test_absolute_url_passes_through_absolute_requests() {
        let client = HttpNetworkClient::new("https://example.com").unwrap();
        let request =
            Request::get("https://fonts.gstatic.com/inter.woff2", ResourceKind::Font).unwrap();
        assert_eq!(
            client.absolute_url(&request),
            "https://fonts.gstatic.com/inter.woff2"
        );
    }

    #[test]
    fn test_http_network_client_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpNetworkClient>();
    }
}
