//! Worker event surface
//!
//! Ties the collaborators together behind a typed event interface: external
//! lifecycle signals (install, activate, message, sync, push,
//! notificationclick) arrive as `WorkerEvent` values and are dispatched to
//! the owning component. Fetch interception has its own boundary via
//! [`Worker::handle_fetch`], since it produces a response rather than a
//! side effect.

use std::sync::Arc;
use tracing::{debug, error};

use crate::cache::CacheStore;
use crate::config::WorkerConfig;
use crate::constants::{CONTACT_SYNC_TAG, EXPLORE_ACTION};
use crate::error::WorkerError;
use crate::fetch::{FetchDecision, FetchInterceptor, NetworkClient};
use crate::lifecycle::{ClientMessage, LifecycleManager, WorkerState};
use crate::notifications::{ClientSurface, Notification};
use crate::request::Request;
use crate::sync_queue::SubmissionQueue;

/// External lifecycle signal delivered to the worker
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Install,
    Activate,
    Message(ClientMessage),
    Sync { tag: String },
    Push { payload: Option<String> },
    NotificationClick { action: String },
}

/// The assembled cache controller
pub struct Worker {
    site_name: String,
    lifecycle: LifecycleManager,
    interceptor: FetchInterceptor,
    queue: SubmissionQueue,
    surface: Arc<dyn ClientSurface>,
}

impl Worker {
    pub fn new(
        config: &WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkClient>,
        surface: Arc<dyn ClientSurface>,
    ) -> Self {
        Self {
            site_name: config.site_name.clone(),
            lifecycle: LifecycleManager::new(
                config,
                store.clone(),
                network.clone(),
                surface.clone(),
            ),
            interceptor: FetchInterceptor::new(config, store.clone(), network.clone()),
            queue: SubmissionQueue::new(config, store, network),
            surface,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.lifecycle.state()
    }

    pub fn queue(&self) -> &SubmissionQueue {
        &self.queue
    }

    /// Decide the response for one intercepted request
    pub async fn handle_fetch(&self, request: Request) -> FetchDecision {
        self.interceptor.handle(request).await
    }

    /// Dispatch one external lifecycle signal.
    ///
    /// Errors are returned for the caller's accounting but never abort the
    /// worker: a failed install still leaves the controller usable through
    /// best-effort network fallback, and a failed flush leaves the batch
    /// queued for the next sync.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<(), WorkerError> {
        match event {
            WorkerEvent::Install => {
                if let Err(err) = self.lifecycle.install().await {
                    error!(error = %err, "install failed");
                    return Err(err);
                }
                Ok(())
            }
            WorkerEvent::Activate => self.lifecycle.activate().await,
            WorkerEvent::Message(message) => {
                self.lifecycle.handle_message(&message);
                Ok(())
            }
            WorkerEvent::Sync { tag } => {
                if tag == CONTACT_SYNC_TAG {
                    self.queue.flush().await.map(|_| ())
                } else {
                    debug!(tag = %tag, "ignoring unknown sync tag");
                    Ok(())
                }
            }
            WorkerEvent::Push { payload } => {
                let notification = Notification::for_push(&self.site_name, payload.as_deref());
                self.surface.show_notification(notification).await;
                Ok(())
            }
            WorkerEvent::NotificationClick { action } => {
                if action == EXPLORE_ACTION {
                    self.surface.open_window("/").await;
                }
                Ok(())
            }
        }
    }
}
