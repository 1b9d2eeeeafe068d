//! Application state for the Salary Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::TaxStore;

/// Shared application state.
///
/// Holds the tax store every handler opens its session against.
#[derive(Clone)]
pub struct AppState {
    store: Arc<TaxStore>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: TaxStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the tax store.
    pub fn store(&self) -> &TaxStore {
        &self.store
    }
}
