//! Driving port for recipe reads scoped to the requesting user.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, PopulatedRecipe, RecipeId, UserId};

/// Data needed to render the edit form: the recipe plus the full catalogue.
#[derive(Debug, Clone)]
pub struct RecipeEditForm {
    pub recipe: PopulatedRecipe,
    pub catalogue: Vec<Ingredient>,
}

/// Domain use-case port for listing and showing recipes.
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// Recipes owned by `requester` with ingredients resolved.
    async fn list(&self, requester: &UserId) -> Result<Vec<PopulatedRecipe>, Error>;

    /// One recipe with ingredients resolved. Missing and foreign recipes both
    /// yield `NotFound`.
    async fn show(&self, requester: &UserId, id: &RecipeId) -> Result<PopulatedRecipe, Error>;

    /// Same gate as [`RecipeQuery::show`], plus the catalogue for the form.
    async fn edit_form(&self, requester: &UserId, id: &RecipeId) -> Result<RecipeEditForm, Error>;
}
