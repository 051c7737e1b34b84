//! Shared application state for all routes.

use crate::store::RestaurantStore;
use std::sync::Arc;

/// Injected into every handler; constructed once at startup around whichever
/// store backs the process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RestaurantStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }
}
