//! PostgreSQL recipe store.
//!
//! Documents live in `recipe_document` as `JSONB` bodies keyed by a UUIDv7.
//! Bodies are stored exactly as written; normalization happens on read in
//! `recipe_core::normalize`.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{Pool, Postgres};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use recipe_core::{
    new_v7, parse_recipe_id, Error, RawDocument, RecipeStore, Result, StoredDocument,
};

/// PostgreSQL implementation of RecipeStore.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: Pool<Postgres>,
}

impl PgRecipeStore {
    /// Create a new PgRecipeStore with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.pool.is_closed() {
            error!(
                subsystem = "store",
                component = "pg_recipe_store",
                "Recipe store pool is closed"
            );
            return Err(Error::StoreUnavailable(
                "store connection pool is closed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Turn a stored row into a document, tolerating non-object bodies.
fn row_to_document(id: Uuid, body: JsonValue) -> StoredDocument {
    match body {
        JsonValue::Object(fields) => StoredDocument::new(id, fields),
        other => {
            warn!(
                subsystem = "store",
                component = "pg_recipe_store",
                recipe_id = %id,
                body_type = json_type_name(&other),
                "Stored recipe body is not an object, treating as empty"
            );
            StoredDocument::new(id, RawDocument::new())
        }
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn list_all(&self) -> Result<Vec<StoredDocument>> {
        self.ensure_connected()?;
        let start = Instant::now();

        let rows: Vec<(Uuid, JsonValue)> =
            sqlx::query_as("SELECT id, body FROM recipe_document")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::from)?;

        debug!(
            subsystem = "store",
            component = "pg_recipe_store",
            op = "list_all",
            result_count = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed recipe documents"
        );

        Ok(rows
            .into_iter()
            .map(|(id, body)| row_to_document(id, body))
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<StoredDocument>> {
        let id = parse_recipe_id(id)?;
        self.ensure_connected()?;

        let row: Option<(Uuid, JsonValue)> =
            sqlx::query_as("SELECT id, body FROM recipe_document WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::from)?;

        debug!(
            subsystem = "store",
            component = "pg_recipe_store",
            op = "get_by_id",
            recipe_id = %id,
            found = row.is_some(),
            "Fetched recipe document"
        );

        Ok(row.map(|(id, body)| row_to_document(id, body)))
    }

    async fn insert(&self, document: RawDocument) -> Result<StoredDocument> {
        self.ensure_connected()?;
        let id = new_v7();

        sqlx::query("INSERT INTO recipe_document (id, body) VALUES ($1, $2)")
            .bind(id)
            .bind(JsonValue::Object(document.clone()))
            .execute(&self.pool)
            .await
            .map_err(Error::from)?;

        info!(
            subsystem = "store",
            component = "pg_recipe_store",
            op = "insert",
            recipe_id = %id,
            "Inserted recipe document"
        );

        Ok(StoredDocument::new(id, document))
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64> {
        let id = parse_recipe_id(id)?;
        self.ensure_connected()?;

        let deleted = sqlx::query("DELETE FROM recipe_document WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::from)?
            .rows_affected();

        info!(
            subsystem = "store",
            component = "pg_recipe_store",
            op = "delete_by_id",
            recipe_id = %id,
            deleted_count = deleted,
            "Deleted recipe document"
        );

        Ok(deleted)
    }

    fn is_connected(&self) -> bool {
        !self.pool.is_closed()
    }
}
