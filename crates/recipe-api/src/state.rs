//! Shared application state.

use std::sync::Arc;

use recipe_core::RecipeStore;

/// Application state shared across handlers.
///
/// The store is connected once at startup and never re-initialized; handlers
/// only ever see it through the [`RecipeStore`] trait.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    /// Listen port, published by the health check.
    pub port: u16,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, port: u16) -> Self {
        Self { store, port }
    }
}
