//! Driving port for recipe mutations scoped to the requesting user.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, UserId};

/// Domain use-case port for creating, updating and deleting recipes.
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Create a recipe owned by `owner`.
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Apply `draft` to a recipe owned by `requester`. Missing and foreign
    /// recipes both yield `NotFound` without mutating anything.
    async fn update(
        &self,
        requester: &UserId,
        id: &RecipeId,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error>;

    /// Delete a recipe owned by `requester`. Deleting nothing is not an error.
    async fn delete(&self, requester: &UserId, id: &RecipeId) -> Result<(), Error>;
}
