//! Recipe normalization.
//!
//! Documents in the store were written under at least two incompatible
//! schemas, so the same semantic field shows up under different keys
//! (`"Recipe Name"`, `recipe_name`, `title`, ...). [`normalize`] folds any raw
//! document into the canonical [`Recipe`] shape.
//!
//! Each canonical field has an ordered alias table. Order is priority: the
//! newest schema's key comes first and the first populated alias wins. Adding a
//! historical key is a change to the table, not to the resolution logic.
//!
//! ```
//! use recipe_core::{normalize, StoredDocument};
//! use serde_json::json;
//! use uuid::Uuid;
//!
//! let fields = json!({"Recipe Name": "  Pancakes ", "steps": "Mix, fry."});
//! let doc = StoredDocument::new(Uuid::nil(), fields.as_object().unwrap().clone());
//!
//! let recipe = normalize(&doc);
//! assert_eq!(recipe.name, "Pancakes");
//! assert_eq!(recipe.ingredients, "No ingredients");
//! assert_eq!(recipe.instructions, "Mix, fry.");
//! ```

use serde_json::Value as JsonValue;

use crate::defaults::{
    LIST_SEPARATOR, NO_INGREDIENTS, NO_INSTRUCTIONS, PLACEHOLDER_IMAGE_URL, UNKNOWN_RECIPE_NAME,
};
use crate::models::{RawDocument, Recipe, StoredDocument};

/// Ordered alias table for one canonical field, with its fallback value.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    /// Canonical field name.
    pub field: &'static str,
    /// Stored keys to check, highest priority first.
    pub aliases: &'static [&'static str],
    /// Value substituted when no alias is populated.
    pub default: &'static str,
}

pub const NAME: FieldAliases = FieldAliases {
    field: "name",
    aliases: &[
        "name",
        "Recipe Name",
        "recipeName",
        "recipe_name",
        "RecipeName",
        "title",
        "Title",
    ],
    default: UNKNOWN_RECIPE_NAME,
};

pub const INGREDIENTS: FieldAliases = FieldAliases {
    field: "ingredients",
    aliases: &[
        "ingredients",
        "Ingredients",
        "ingredient",
        "ingredient_list",
        "Ingredient List",
        "items",
    ],
    default: NO_INGREDIENTS,
};

pub const INSTRUCTIONS: FieldAliases = FieldAliases {
    field: "instructions",
    aliases: &[
        "instructions",
        "Preparation / Instructions",
        "Preparation/Instructions",
        "preparation",
        "Preparation",
        "steps",
        "Steps",
        "method",
        "Method",
    ],
    default: NO_INSTRUCTIONS,
};

pub const IMAGE: FieldAliases = FieldAliases {
    field: "image",
    aliases: &["image"],
    default: PLACEHOLDER_IMAGE_URL,
};

/// Normalize a stored document into the canonical recipe shape.
///
/// Total over any input: missing or unusable fields are replaced with their
/// defaults, never reported as errors.
pub fn normalize(doc: &StoredDocument) -> Recipe {
    Recipe {
        id: doc.id,
        name: resolve_field(&doc.fields, &NAME),
        ingredients: resolve_field(&doc.fields, &INGREDIENTS),
        instructions: resolve_field(&doc.fields, &INSTRUCTIONS),
        image: resolve_field(&doc.fields, &IMAGE),
    }
}

/// Resolve one canonical field from a raw document.
///
/// Walks the alias table in order and returns the first value that is present,
/// non-null and non-blank once converted to trimmed text. Falls back to the
/// table's default.
pub fn resolve_field(fields: &RawDocument, table: &FieldAliases) -> String {
    table
        .aliases
        .iter()
        .filter_map(|alias| fields.get(*alias))
        .filter_map(value_to_text)
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| table.default.to_string())
}

/// Convert a stored JSON value into display text.
///
/// `null` yields `None`. Lists are flattened with [`LIST_SEPARATOR`], skipping
/// null and blank elements; objects fall back to compact JSON text.
pub fn value_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(value_to_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            Some(parts.join(LIST_SEPARATOR))
        }
        JsonValue::Object(_) => Some(value.to_string()),
    }
}
