//! Shared application state for HTTP handlers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;

/// State shared by every request handler
pub struct AppState {
    /// The product catalogue and its index
    pub catalog: Arc<Catalog>,

    /// Source of response ids for JSON responses
    pub request_counter: AtomicU64,

    /// Every request routed through the API, any endpoint
    pub requests_served: AtomicU64,

    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            request_counter: AtomicU64::new(0),
            requests_served: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    /// Allocate the id of the next response
    pub fn next_request_id(&self) -> u64 {
        self.request_counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Count one incoming request
    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }
}
