//! Intercepted request model
//!
//! This module defines the view of an outgoing front-end request the
//! controller operates on: method, URL, and the declared destination
//! (resource kind). Request URLs may be root-relative, in which case they are
//! implicitly same-origin.

use http::uri::InvalidUri;
use http::{Method, Uri};

use crate::cache::CacheKey;

/// Declared destination of a request, driving cache and fallback policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Document,
    Image,
    Font,
    Style,
    Script,
    Other,
}

impl ResourceKind {
    /// Parse a destination string as declared by the front-end
    pub fn from_destination(destination: &str) -> Self {
        match destination {
            "document" => ResourceKind::Document,
            "image" => ResourceKind::Image,
            "font" => ResourceKind::Font,
            "style" => ResourceKind::Style,
            "script" => ResourceKind::Script,
            _ => ResourceKind::Other,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceKind::Document => "document",
            ResourceKind::Image => "image",
            ResourceKind::Font => "font",
            ResourceKind::Style => "style",
            ResourceKind::Script => "script",
            ResourceKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// One intercepted outgoing request
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Uri,
    pub destination: ResourceKind,
}

impl Request {
    /// Build a request from a URL string. Fragments are stripped before
    /// parsing since they never reach the network.
    pub fn new(method: Method, url: &str, destination: ResourceKind) -> Result<Self, InvalidUri> {
        let without_fragment = url.split('#').next().unwrap_or(url);
        let url = without_fragment.parse::<Uri>()?;
        Ok(Self {
            method,
            url,
            destination,
        })
    }

    /// Convenience constructor for GET requests
    pub fn get(url: &str, destination: ResourceKind) -> Result<Self, InvalidUri> {
        Self::new(Method::GET, url, destination)
    }

    /// Root-relative URLs carry no authority and are implicitly same-origin
    pub fn is_relative(&self) -> bool {
        self.url.authority().is_none()
    }

    /// "scheme://authority" of an absolute request URL
    pub fn origin(&self) -> Option<String> {
        let scheme = self.url.scheme_str()?;
        let authority = self.url.authority()?;
        Some(format!("{}://{}", scheme, authority))
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host()
    }

    pub fn url_str(&self) -> String {
        self.url.to_string()
    }

    /// Normalized identity under which a GET response is stored
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parses_known_destinations() {
        assert_eq!(
            ResourceKind::from_destination("document"),
            ResourceKind::Document
        );
        assert_eq!(ResourceKind::from_destination("image"), ResourceKind::Image);
        assert_eq!(ResourceKind::from_destination("font"), ResourceKind::Font);
        assert_eq!(ResourceKind::from_destination("style"), ResourceKind::Style);
        assert_eq!(
            ResourceKind::from_destination("script"),
            ResourceKind::Script
        );
    }

    #[test]
    fn test_resource_kind_defaults_to_other() {
        assert_eq!(ResourceKind::from_destination("audio"), ResourceKind::Other);
        assert_eq!(ResourceKind::from_destination(""), ResourceKind::Other);
    }

    #[test]
    fn test_can_create_get_request_with_absolute_url() {
        let request = Request::get("https://example.com/index.html", ResourceKind::Document)
            .expect("valid url");
        assert_eq!(request.method, Method::GET);
        assert!(!request.is_relative());
        assert_eq!(request.origin().as_deref(), Some("https://example.com"));
        assert_eq!(request.host(), Some("example.com"));
    }

    #[test]
    fn test_root_relative_request_is_same_origin() {
        let request = Request::get("/styles.css", ResourceKind::Style).expect("valid url");
        assert!(request.is_relative());
        assert!(request.origin().is_none());
    }

    #[test]
    fn test_fragment_is_stripped_before_parsing() {
        let request = Request::get("https://example.com/page#section", ResourceKind::Document)
            .expect("valid url");
        assert_eq!(request.url_str(), "https://example.com/page");
    }

    #[test]
    fn test_query_string_is_part_of_identity() {
        let a = Request::get("https://example.com/page?v=1", ResourceKind::Document).unwrap();
        let b = Request::get("https://example.com/page?v=2", ResourceKind::Document).unwrap();
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_non_get_request_can_be_constructed() {
        let request = Request::new(
            Method::POST,
            "https://api.example.com/contact",
            ResourceKind::Other,
        )
        .expect("valid url");
        assert_eq!(request.method, Method::POST);
    }
}
