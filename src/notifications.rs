//! Notification surface
//!
//! Builds user-facing system notifications for push events and defines the
//! `ClientSurface` seam through which the worker reaches open client
//! sessions (showing notifications, opening windows, claiming control).

use async_trait::async_trait;
use serde::Serialize;

use crate::constants::{
    CLOSE_ACTION, DEFAULT_PUSH_BODY, EXPLORE_ACTION, NOTIFICATION_BADGE, NOTIFICATION_ICON,
    NOTIFICATION_VIBRATION,
};

/// One named action button on a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// A user-facing system notification
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Build the notification for a push event. The body is the payload text
    /// when present, otherwise the fixed default message.
    pub fn for_push(title: &str, payload: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            body: payload.unwrap_or(DEFAULT_PUSH_BODY).to_string(),
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            vibrate: NOTIFICATION_VIBRATION.to_vec(),
            actions: vec![
                NotificationAction {
                    action: EXPLORE_ACTION.to_string(),
                    title: "Explore".to_string(),
                },
                NotificationAction {
                    action: CLOSE_ACTION.to_string(),
                    title: "Close".to_string(),
                },
            ],
        }
    }
}

/// Boundary to the open client sessions of the front-end
#[async_trait]
pub trait ClientSurface: Send + Sync {
    /// Show a system notification
    async fn show_notification(&self, notification: Notification);

    /// Open (or focus) a window at the given URL
    async fn open_window(&self, url: &str);

    /// Claim control over already-open client sessions so the new version
    /// governs all subsequent requests without a page reload
    async fn claim(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_notification_uses_payload_as_body() {
        let notification = Notification::for_push("Kasa", Some("Hello"));
        assert_eq!(notification.body, "Hello");
        assert_eq!(notification.title, "Kasa");
    }

    #[test]
    fn test_push_notification_without_payload_uses_default_body() {
        let notification = Notification::for_push("Kasa", None);
        assert_eq!(notification.body, DEFAULT_PUSH_BODY);
    }

    #[test]
    fn test_push_notification_carries_fixed_presentation() {
        let notification = Notification::for_push("Kasa", Some("Hello"));
        assert_eq!(notification.icon, "/images/icon-192x192.png");
        assert_eq!(notification.badge, "/images/badge-72x72.png");
        assert_eq!(notification.vibrate, vec![100, 50, 100]);
    }

    #[test]
    fn test_push_notification_has_explore_and_close_actions() {
        let notification = Notification::for_push("Kasa", None);
        let actions: Vec<&str> = notification
            .actions
            .iter()
            .map(|a| a.action.as_str())
            .collect();
        assert_eq!(actions, vec!["explore", "close"]);
    }
}
