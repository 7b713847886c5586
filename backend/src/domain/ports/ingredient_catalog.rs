//! Driving port for the shared ingredient catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, NewIngredient};

/// Domain use-case port for catalogue reads and submissions.
#[async_trait]
pub trait IngredientCatalog: Send + Sync {
    /// Every catalogue entry, unfiltered.
    async fn list(&self) -> Result<Vec<Ingredient>, Error>;

    /// Add an entry. No uniqueness is enforced.
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, Error>;
}
