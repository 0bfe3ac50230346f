//! Core traits for recipe storage.
//!
//! Backends implement [`RecipeStore`]; the API only ever talks to
//! `Arc<dyn RecipeStore>`, so Postgres and the in-memory store are
//! interchangeable.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{RawDocument, StoredDocument};

// =============================================================================
// RECIPE STORE
// =============================================================================

/// Document store holding the recipe collection.
///
/// Identifiers are passed as the raw strings received from clients; each
/// backend is responsible for rejecting malformed ones with
/// [`Error::InvalidIdentifier`](crate::Error::InvalidIdentifier).
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All raw documents in store-native order (no sort guarantee).
    async fn list_all(&self) -> Result<Vec<StoredDocument>>;

    /// Fetch one raw document.
    ///
    /// Returns `Ok(None)` when no document has this identifier.
    async fn get_by_id(&self, id: &str) -> Result<Option<StoredDocument>>;

    /// Persist a new document and return it with its assigned identifier.
    async fn insert(&self, document: RawDocument) -> Result<StoredDocument>;

    /// Remove a document, returning how many were removed (0 or 1).
    async fn delete_by_id(&self, id: &str) -> Result<u64>;

    /// Whether the underlying connection is established.
    fn is_connected(&self) -> bool;
}
