//! # recipe-db
//!
//! PostgreSQL document store for the recipe book service.
//!
//! This crate provides:
//! - Connection pool management
//! - [`PgRecipeStore`], a `JSONB` document store implementing `RecipeStore`
//! - [`InMemoryRecipeStore`] for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use recipe_db::{Database, PoolConfig, RecipeStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db =
//!         Database::connect_with_config("postgres://localhost/recipe_book", PoolConfig::new())
//!             .await?;
//!
//!     let fields = serde_json::json!({"name": "Tea"});
//!     let doc = db.recipes.insert(fields.as_object().unwrap().clone()).await?;
//!
//!     println!("Created recipe: {}", doc.id);
//!     Ok(())
//! }
//! ```
pub mod memory;
pub mod pool;
pub mod recipes;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use recipe_core::*;

pub use memory::InMemoryRecipeStore;
pub use pool::{connect_pool, log_pool_metrics, PoolConfig};
pub use recipes::PgRecipeStore;

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Recipe document store.
    pub recipes: PgRecipeStore,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            recipes: PgRecipeStore::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the store at `url` with the given pool settings.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = connect_pool(url, &config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    /// Close the pool; later store calls report `StoreUnavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
