//! Core data models for the recipe book.
//!
//! [`StoredDocument`] is what a store hands back: an identifier plus whatever
//! fields the document was written with. [`Recipe`] is the canonical shape every
//! API response uses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// Raw document body: arbitrary string keys to JSON values.
pub type RawDocument = Map<String, JsonValue>;

// =============================================================================
// STORED DOCUMENTS
// =============================================================================

/// A raw document as persisted, together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub fields: RawDocument,
}

impl StoredDocument {
    pub fn new(id: Uuid, fields: RawDocument) -> Self {
        Self { id, fields }
    }
}

// =============================================================================
// CANONICAL RECIPE
// =============================================================================

/// Canonical, post-normalization recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recipe {
    /// Store-assigned identifier (UUIDv7).
    pub id: Uuid,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    /// Image URL, or the placeholder URL when the recipe has none.
    pub image: String,
}

impl Recipe {
    /// Case-insensitive substring match on the canonical name.
    pub fn name_matches(&self, search: &str) -> bool {
        self.name.to_lowercase().contains(&search.to_lowercase())
    }
}

// =============================================================================
// WRITE PATH
// =============================================================================

/// Client submission for a new recipe, as received on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Validated recipe ready to be persisted, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    pub image: String,
}

impl NewRecipe {
    /// Document body written to the store, under canonical field names.
    pub fn into_document(self) -> RawDocument {
        let mut doc = RawDocument::new();
        doc.insert("name".to_string(), JsonValue::String(self.name));
        doc.insert(
            "ingredients".to_string(),
            JsonValue::String(self.ingredients),
        );
        doc.insert(
            "instructions".to_string(),
            JsonValue::String(self.instructions),
        );
        doc.insert("image".to_string(), JsonValue::String(self.image));
        doc
    }
}
