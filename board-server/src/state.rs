use std::sync::Arc;

use crate::db::{Database, JobStore};

/// Axum application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Backing store for postings
    pub store: Arc<dyn JobStore>,
}

impl AppState {
    /// Create new application state backed by the SQLite database
    pub fn new(db: Database) -> Self {
        Self::with_store(Arc::new(db))
    }

    /// Create application state over any store implementation
    pub fn with_store(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }
}
