//! Asset classifier
//!
//! Pure per-request routing policy: decides whether the interceptor touches
//! a request at all and, if so, whether its response may be cached.
//!
//! Rules, in order:
//! 1. Only GET requests are eligible; everything else bypasses interception.
//! 2. Cross-origin requests bypass unless their exact URL is in the
//!    pre-declared static-asset allow-list.
//! 3. Same-origin requests are always cache-eligible; allow-listed
//!    cross-origin requests are eligible only if their hostname is trusted.

use http::Method;

use crate::config::WorkerConfig;
use crate::request::{Request, ResourceKind};

/// Whose request this is, relative to the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    SameOrigin,
    AllowedCrossOrigin,
    /// Not ours to handle; falls straight through to default network
    /// handling, no caching and no fallback
    Bypass,
}

/// Ephemeral routing policy for one incoming request
#[derive(Debug, Clone, Copy)]
pub struct RoutingDecision {
    pub scope: RequestScope,
    pub cache_eligible: bool,
    pub kind: ResourceKind,
}

impl RoutingDecision {
    fn bypass(kind: ResourceKind) -> Self {
        Self {
            scope: RequestScope::Bypass,
            cache_eligible: false,
            kind,
        }
    }

    pub fn is_bypass(&self) -> bool {
        self.scope == RequestScope::Bypass
    }

    /// Documents drive the background-refresh behavior on cache hits
    pub fn is_document(&self) -> bool {
        self.kind == ResourceKind::Document
    }
}

/// Asset classifier over the site's origin and fixed allow-lists
#[derive(Debug, Clone)]
pub struct Classifier {
    origin: String,
    static_assets: Vec<String>,
    allowed_hosts: Vec<String>,
}

impl Classifier {
    pub fn new(
        origin: impl Into<String>,
        static_assets: Vec<String>,
        allowed_hosts: Vec<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            static_assets,
            allowed_hosts,
        }
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(
            config.origin.clone(),
            config.static_assets.clone(),
            config.allowed_hosts.clone(),
        )
    }

    pub fn classify(&self, request: &Request) -> RoutingDecision {
        let kind = request.destination;

        if request.method != Method::GET {
            return RoutingDecision::bypass(kind);
        }

        let same_origin =
            request.is_relative() || request.origin().as_deref() == Some(self.origin.as_str());

        if !same_origin {
            let url = request.url_str();
            if !self.static_assets.iter().any(|asset| asset == &url) {
                return RoutingDecision::bypass(kind);
            }
        }

        let cache_eligible = same_origin
            || request
                .host()
                .map(|host| self.allowed_hosts.iter().any(|allowed| allowed == host))
                .unwrap_or(false);

        RoutingDecision {
            scope: if same_origin {
                RequestScope::SameOrigin
            } else {
                RequestScope::AllowedCrossOrigin
            },
            cache_eligible,
            kind,
        }
    }
}
