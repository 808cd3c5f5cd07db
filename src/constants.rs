// Constants module - centralized fixed values for the worker
//
// This module defines all fixed values used throughout the codebase.
// Using constants instead of magic numbers/strings improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Cache generation defaults
// =============================================================================

/// Default prefix for generation names ("kasa-static-v1.0.0" etc.)
pub const DEFAULT_CACHE_PREFIX: &str = "kasa";

/// Default cache version; bumping it invalidates the whole previous generation set
pub const DEFAULT_CACHE_VERSION: &str = "v1.0.0";

// =============================================================================
// Fetch defaults
// =============================================================================

/// Requests slower than this emit a diagnostic warning (observability only)
pub const DEFAULT_SLOW_REQUEST_THRESHOLD_MS: u64 = 1000;

/// Network fetch timeout in seconds for the real HTTP client
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Pre-warm manifest and allow-lists
// =============================================================================

/// Assets cached at install time. Root-relative entries are resolved against
/// the configured origin; the rest are absolute third-party URLs.
pub const DEFAULT_STATIC_ASSETS: [&str; 8] = [
    "/",
    "/index.html",
    "/styles.css",
    "/script.js",
    "/manifest.json",
    "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700;800;900&family=JetBrains+Mono:wght@400;500&display=swap",
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css",
    "https://cdn.jsdelivr.net/npm/particles.js@2.0.0/particles.min.js",
];

/// Cross-origin hosts whose responses may be cached
pub const DEFAULT_ALLOWED_HOSTS: [&str; 4] = [
    "fonts.googleapis.com",
    "fonts.gstatic.com",
    "cdnjs.cloudflare.com",
    "cdn.jsdelivr.net",
];

// =============================================================================
// Offline fallback
// =============================================================================

/// Well-known path of the pre-cached offline page
pub const OFFLINE_PAGE_PATH: &str = "/offline.html";

/// Plain-text body served when a document is requested offline and no
/// offline page was pre-cached
pub const OFFLINE_DOCUMENT_BODY: &str = "Offline - Please check your internet connection";

/// Plain-text body served for non-document, non-image resources offline
pub const OFFLINE_RESOURCE_BODY: &str = "Offline - Resource not available";

/// Inline placeholder graphic served for images offline
pub const OFFLINE_IMAGE_SVG: &str = "<svg width=\"400\" height=\"300\" xmlns=\"http://www.w3.org/2000/svg\"><rect width=\"100%\" height=\"100%\" fill=\"#f0f0f0\"/><text x=\"50%\" y=\"50%\" text-anchor=\"middle\" dy=\".3em\" fill=\"#666\">Image unavailable offline</text></svg>";

// =============================================================================
// Deferred submissions
// =============================================================================

/// Key under which the pending submission list is persisted
pub const PENDING_SUBMISSIONS_PATH: &str = "/pending-contact-forms";

/// Background-sync tag that triggers a flush of the submission queue
pub const CONTACT_SYNC_TAG: &str = "contact-form";

/// Default remote endpoint accepting JSON-encoded contact-form data
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://api.example.com/contact";

// =============================================================================
// Notifications
// =============================================================================

/// Default site name used as the notification title
pub const DEFAULT_SITE_NAME: &str = "Kasa";

/// Body used when a push event carries no payload
pub const DEFAULT_PUSH_BODY: &str = "New update available";

/// Notification icon path
pub const NOTIFICATION_ICON: &str = "/images/icon-192x192.png";

/// Notification badge path
pub const NOTIFICATION_BADGE: &str = "/images/badge-72x72.png";

/// Notification vibration pattern in milliseconds
pub const NOTIFICATION_VIBRATION: [u32; 3] = [100, 50, 100];

/// Notification action that opens the site root
pub const EXPLORE_ACTION: &str = "explore";

/// Notification action that dismisses the notification
pub const CLOSE_ACTION: &str = "close";

// =============================================================================
// Config defaults
// =============================================================================

/// Default site origin; deployments override this in config
pub const DEFAULT_ORIGIN: &str = "https://example.com";
