//! Write-path validation for recipe submissions.

use crate::defaults::{PLACEHOLDER_IMAGE_URL, REQUIRED_FIELDS_MESSAGE};
use crate::error::{Error, Result};
use crate::models::{NewRecipe, RecipeSubmission};

/// Validate a submission and apply write-time defaults.
///
/// `name`, `ingredients` and `instructions` must be present and non-empty.
/// Only emptiness is checked: a whitespace-only value is accepted as-is and the
/// read path trims it later. A missing or empty `image` becomes the placeholder
/// URL.
pub fn validate(input: &RecipeSubmission) -> Result<NewRecipe> {
    let required = [
        ("name", &input.name),
        ("ingredients", &input.ingredients),
        ("instructions", &input.instructions),
    ];

    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(Error::ValidationFailed {
            message: REQUIRED_FIELDS_MESSAGE.to_string(),
            missing,
        });
    }

    let image = input
        .image
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL);

    Ok(NewRecipe {
        name: input.name.clone().unwrap_or_default(),
        ingredients: input.ingredients.clone().unwrap_or_default(),
        instructions: input.instructions.clone().unwrap_or_default(),
        image: image.to_string(),
    })
}
