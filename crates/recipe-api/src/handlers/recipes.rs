//! Recipe CRUD handlers.
//!
//! Every response passes through [`normalize`], including the one for a freshly
//! created recipe, so clients only ever see the canonical shape.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use recipe_core::{defaults::DELETED_MESSAGE, normalize, validate, Error, Recipe, RecipeSubmission};

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecipesQuery {
    /// Case-insensitive substring filter on the recipe name.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

/// List all recipes, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "Recipes",
    params(ListRecipesQuery),
    responses(
        (status = 200, description = "Recipes in store order", body = [Recipe]),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<ListRecipesQuery>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let Query(query) = query?;
    let documents = state.store.list_all().await?;
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let recipes: Vec<Recipe> = documents
        .iter()
        .map(normalize)
        .filter(|recipe| search.map_or(true, |s| recipe.name_matches(s)))
        .collect();

    debug!(
        subsystem = "api",
        component = "recipes",
        op = "list",
        search = search.unwrap_or(""),
        result_count = recipes.len(),
        "Listed recipes"
    );

    Ok(Json(recipes))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    responses(
        (status = 200, description = "The recipe", body = Recipe),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No recipe with this identifier", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id?;
    let document = state
        .store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| Error::recipe_not_found(&id))?;
    Ok(Json(normalize(&document)))
}

/// Create a recipe.
///
/// A failed insert returns an error and nothing is echoed back, so a client
/// never has a half-created recipe to append to its local list.
#[utoipa::path(
    post,
    path = "/recipes",
    tag = "Recipes",
    request_body = RecipeSubmission,
    responses(
        (status = 201, description = "Created recipe with its assigned id", body = Recipe),
        (status = 400, description = "Missing name, ingredients or instructions", body = ErrorBody),
        (status = 413, description = "Request body too large", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(submission) = payload?;
    let new_recipe = validate(&submission)?;

    let stored = state.store.insert(new_recipe.into_document()).await?;
    let recipe = normalize(&stored);

    info!(
        subsystem = "api",
        component = "recipes",
        op = "create",
        recipe_id = %recipe.id,
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Delete a recipe.
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    responses(
        (status = 200, description = "Recipe deleted", body = DeletedResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No recipe with this identifier", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id?;
    let deleted = state.store.delete_by_id(&id).await?;
    if deleted == 0 {
        return Err(Error::recipe_not_found(&id).into());
    }

    info!(
        subsystem = "api",
        component = "recipes",
        op = "delete",
        recipe_id = %id,
        "Recipe deleted"
    );

    Ok(Json(DeletedResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
