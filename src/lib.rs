// Kasa offline cache controller library

pub mod cache;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod lifecycle;
pub mod logging;
pub mod notifications;
pub mod request;
pub mod sync_queue;
pub mod worker;
