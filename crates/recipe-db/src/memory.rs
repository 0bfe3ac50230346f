//! In-memory recipe store for deterministic testing.
//!
//! Behaves like [`PgRecipeStore`](crate::PgRecipeStore) from the caller's point
//! of view: same identifier format, same error kinds. The connection can be
//! dropped and restored to exercise store-unavailable paths.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_db::memory::InMemoryRecipeStore;
//! use recipe_core::RecipeStore;
//! use serde_json::json;
//!
//! # tokio_test_block(async {
//! let store = InMemoryRecipeStore::new();
//! let doc = store
//!     .insert(json!({"title": "Soup"}).as_object().unwrap().clone())
//!     .await
//!     .unwrap();
//! assert_eq!(store.delete_by_id(&doc.id.to_string()).await.unwrap(), 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use recipe_core::{
    new_v7, parse_recipe_id, Error, RawDocument, RecipeStore, Result, StoredDocument,
};

/// In-memory recipe store.
///
/// Cloning shares the underlying collection.
#[derive(Clone, Default)]
pub struct InMemoryRecipeStore {
    documents: Arc<RwLock<Vec<StoredDocument>>>,
    disconnected: Arc<AtomicBool>,
}

impl InMemoryRecipeStore {
    /// Create an empty, connected store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with raw documents, each given a fresh id.
    ///
    /// Useful for reproducing documents written under older schemas.
    pub fn with_documents(documents: impl IntoIterator<Item = RawDocument>) -> Self {
        let seeded = documents
            .into_iter()
            .map(|fields| StoredDocument::new(new_v7(), fields))
            .collect();
        Self {
            documents: Arc::new(RwLock::new(seeded)),
            disconnected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate losing the store connection.
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }

    /// Restore a dropped connection.
    pub fn reconnect(&self) {
        self.disconnected.store(false, Ordering::SeqCst);
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable(
                "in-memory store is disconnected".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn list_all(&self) -> Result<Vec<StoredDocument>> {
        self.ensure_connected()?;
        let documents = self.documents.read().await;
        debug!(
            subsystem = "store",
            component = "memory_store",
            op = "list_all",
            result_count = documents.len(),
            "Listed recipe documents"
        );
        Ok(documents.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredDocument>> {
        let id = parse_recipe_id(id)?;
        self.ensure_connected()?;
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| doc.id == id).cloned())
    }

    async fn insert(&self, document: RawDocument) -> Result<StoredDocument> {
        self.ensure_connected()?;
        let stored = StoredDocument::new(new_v7(), document);
        trace!(
            subsystem = "store",
            component = "memory_store",
            op = "insert",
            recipe_id = %stored.id,
            "Inserted recipe document"
        );
        self.documents.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let id = parse_recipe_id(id)?;
        self.ensure_connected()?;
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok((before - documents.len()) as u64)
    }

    fn is_connected(&self) -> bool {
        !self.disconnected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> RawDocument {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_keeps_fields() {
        let store = InMemoryRecipeStore::new();
        let doc = store.insert(fields(json!({"name": "Tea"}))).await.unwrap();

        assert_eq!(doc.id.get_version_num(), 7);
        assert_eq!(doc.fields["name"], "Tea");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_found_and_missing() {
        let store = InMemoryRecipeStore::new();
        let doc = store.insert(fields(json!({"name": "Tea"}))).await.unwrap();

        let found = store.get_by_id(&doc.id.to_string()).await.unwrap();
        assert_eq!(found, Some(doc));

        let missing = store.get_by_id(&new_v7().to_string()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_malformed_id_is_invalid_identifier() {
        let store = InMemoryRecipeStore::new();
        assert!(matches!(
            store.get_by_id("abc").await,
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(matches!(
            store.delete_by_id("abc").await,
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_twice_returns_one_then_zero() {
        let store = InMemoryRecipeStore::new();
        let doc = store.insert(fields(json!({"name": "Tea"}))).await.unwrap();
        let id = doc.id.to_string();

        assert_eq!(store.delete_by_id(&id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(&id).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_disconnected_store_is_unavailable() {
        let store = InMemoryRecipeStore::new();
        store.disconnect();

        assert!(!store.is_connected());
        assert!(matches!(
            store.list_all().await,
            Err(Error::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.insert(RawDocument::new()).await,
            Err(Error::StoreUnavailable(_))
        ));

        let id = new_v7().to_string();
        assert!(matches!(
            store.get_by_id(&id).await,
            Err(Error::StoreUnavailable(_))
        ));
        assert!(matches!(
            store.delete_by_id(&id).await,
            Err(Error::StoreUnavailable(_))
        ));

        store.reconnect();
        assert!(store.is_connected());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_with_documents_seeds_legacy_shapes() {
        let store = InMemoryRecipeStore::with_documents(vec![
            fields(json!({"Recipe Name": "Old"})),
            fields(json!({"title": "Older"})),
        ]);
        let docs = store.list_all().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_ne!(docs[0].id, docs[1].id);
    }

    #[tokio::test]
    async fn test_clones_share_collection() {
        let store = InMemoryRecipeStore::new();
        let other = store.clone();
        store.insert(fields(json!({"name": "Tea"}))).await.unwrap();
        assert_eq!(other.len().await, 1);
    }
}
