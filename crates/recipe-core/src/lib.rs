//! # recipe-core
//!
//! Core types, traits, and the normalization layer for the recipe book service.
//!
//! Stored recipes were written under several historical schemas, so the
//! documents in the store do not agree on field names. This crate owns the
//! single place where that drift is absorbed ([`normalize`]) and the write-path
//! gate ([`validate`]). Storage backends implement [`RecipeStore`].

pub mod defaults;
pub mod error;
pub mod models;
pub mod normalize;
pub mod traits;
pub mod uuid_utils;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use normalize::{normalize, resolve_field, value_to_text, FieldAliases};
pub use traits::*;
pub use uuid_utils::{new_v7, parse_recipe_id};
pub use validation::validate;
