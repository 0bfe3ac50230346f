//! Centralized default constants for the recipe book service.
//!
//! Crates reference these instead of repeating literals, so the canonical
//! fallbacks the normalizer substitutes stay in one place.

// =============================================================================
// CANONICAL FALLBACKS
// =============================================================================

/// Image URL used when a recipe has no image of its own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// Name substituted when no name alias is populated.
pub const UNKNOWN_RECIPE_NAME: &str = "Unknown Recipe";

/// Ingredients substituted when no ingredients alias is populated.
pub const NO_INGREDIENTS: &str = "No ingredients";

/// Instructions substituted when no instructions alias is populated.
pub const NO_INSTRUCTIONS: &str = "No instructions";

/// Separator used when a historical list value is flattened into text.
pub const LIST_SEPARATOR: &str = ", ";

// =============================================================================
// VALIDATION
// =============================================================================

/// Message returned when a submission lacks a required field.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, ingredients, and instructions are required.";

// =============================================================================
// SERVER
// =============================================================================

/// Default listen port published in the health check.
pub const PORT: u16 = 5000;

/// Default bind host.
pub const HOST: &str = "0.0.0.0";

/// Default store connection string.
pub const DATABASE_URL: &str = "postgres://localhost/recipe_book";

/// Confirmation message returned after a successful delete.
pub const DELETED_MESSAGE: &str = "Recipe deleted successfully";

/// Maximum accepted request body size in bytes (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
