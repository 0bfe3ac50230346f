//! Integration tests for the PostgreSQL recipe store.
//!
//! These run against `DATABASE_URL` (or the default test URL) inside a private
//! schema. When no database is reachable every test returns early.

use recipe_db::test_fixtures::TestDatabase;
use recipe_db::{normalize, Error, PgRecipeStore, RecipeStore};
use serde_json::json;
use uuid::Uuid;

macro_rules! require_db {
    () => {{
        let _ = dotenvy::dotenv();
        match TestDatabase::try_new().await {
            Some(db) => db,
            None => {
                eprintln!("Skipping: test database not available");
                return;
            }
        }
    }};
}

fn fields(value: serde_json::Value) -> recipe_db::RawDocument {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_insert_then_get_roundtrips_body() {
    let db = require_db!();

    let inserted = db
        .store
        .insert(fields(json!({
            "name": "Tea",
            "ingredients": "water, leaves",
            "instructions": "boil",
            "image": "https://via.placeholder.com/150"
        })))
        .await
        .unwrap();

    let fetched = db
        .store
        .get_by_id(&inserted.id.to_string())
        .await
        .unwrap()
        .expect("inserted document should be found");

    assert_eq!(fetched, inserted);
    db.cleanup().await;
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let db = require_db!();
    let missing = db.store.get_by_id(&Uuid::now_v7().to_string()).await.unwrap();
    assert!(missing.is_none());
    db.cleanup().await;
}

#[tokio::test]
async fn test_malformed_id_is_rejected_before_query() {
    let db = require_db!();
    let err = db.store.get_by_id("64f1c2e9a1b2c3d4e5f60718").await.unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier(_)));
    db.cleanup().await;
}

#[tokio::test]
async fn test_delete_twice() {
    let db = require_db!();
    let doc = db.store.insert(fields(json!({"name": "Tea"}))).await.unwrap();
    let id = doc.id.to_string();

    assert_eq!(db.store.delete_by_id(&id).await.unwrap(), 1);
    assert_eq!(db.store.delete_by_id(&id).await.unwrap(), 0);
    db.cleanup().await;
}

#[tokio::test]
async fn test_legacy_documents_normalize_from_store() {
    let db = require_db!();
    let id = db
        .insert_raw(json!({
            "Recipe Name": " Grandma's Stew ",
            "Ingredient List": ["beef", "carrots"],
            "Preparation / Instructions": "Simmer for 3 hours"
        }))
        .await;

    let docs = db.store.list_all().await.unwrap();
    assert_eq!(docs.len(), 1);

    let recipe = normalize(&docs[0]);
    assert_eq!(recipe.id, id);
    assert_eq!(recipe.name, "Grandma's Stew");
    assert_eq!(recipe.ingredients, "beef, carrots");
    assert_eq!(recipe.instructions, "Simmer for 3 hours");
    assert_eq!(recipe.image, "https://via.placeholder.com/150");
    db.cleanup().await;
}

#[tokio::test]
async fn test_closed_pool_is_unavailable() {
    let db = require_db!();
    let pool = db.connect_detached_pool().await;
    let store = PgRecipeStore::new(pool.clone());
    assert!(store.is_connected());

    pool.close().await;
    assert!(!store.is_connected());
    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
    let err = store.insert(fields(json!({"name": "Tea"}))).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));

    // The fixture's own pool stays usable, so its schema is still dropped.
    assert!(db.store.is_connected());
    db.cleanup().await;
}
