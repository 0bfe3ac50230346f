//! HTTP handlers for recipe-api.

pub mod health;
pub mod recipes;

pub use health::{health_check, HealthResponse};
pub use recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, DeletedResponse};
