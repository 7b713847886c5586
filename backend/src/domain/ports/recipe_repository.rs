//! Port abstraction for recipe persistence.
//!
//! Writes other than insert are scoped to `(id, owner)` so the ownership
//! check happens inside the same store operation as the mutation.
use async_trait::async_trait;

use crate::domain::{Recipe, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Recipes whose owner is `owner`, in the store's natural order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Fetch one recipe regardless of owner. Callers apply the ownership
    /// predicate themselves.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Persist a new recipe.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Overwrite name, instructions and ingredient ids of the row matching
    /// both `recipe.id` and `recipe.owner`. The owner column is never
    /// written. Returns whether a row matched.
    async fn update_owned(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError>;

    /// Delete the row matching both `id` and `owner`. Returns whether a row
    /// was removed.
    async fn delete_owned(&self, id: &RecipeId, owner: &UserId)
    -> Result<bool, RecipeRepositoryError>;
}
