//! Port abstraction for the shared ingredient catalogue store.
use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ingredient repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Every catalogue entry in the store's natural order.
    async fn list_all(&self) -> Result<Vec<Ingredient>, IngredientRepositoryError>;

    /// Entries whose id appears in `ids`, each at most once, in no particular
    /// order. Unknown ids are skipped.
    async fn find_by_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError>;

    /// Persist a new catalogue entry.
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError>;
}
