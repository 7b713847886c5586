//! Shared ingredient catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::persistence_error_mapping::map_ingredient_repository_error;
use super::ports::{IngredientCatalog, IngredientRepository};
use super::{Error, Ingredient, IngredientId, NewIngredient};

/// [`IngredientCatalog`] implementation over an ingredient repository.
#[derive(Clone)]
pub struct IngredientCatalogService<R> {
    ingredients: Arc<R>,
}

impl<R> IngredientCatalogService<R> {
    /// Create a new service with the given repository.
    pub fn new(ingredients: Arc<R>) -> Self {
        Self { ingredients }
    }
}

#[async_trait]
impl<R> IngredientCatalog for IngredientCatalogService<R>
where
    R: IngredientRepository,
{
    async fn list(&self) -> Result<Vec<Ingredient>, Error> {
        self.ingredients
            .list_all()
            .await
            .map_err(map_ingredient_repository_error)
    }

    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, Error> {
        let ingredient = ingredient.into_ingredient(IngredientId::random());
        self.ingredients
            .insert(&ingredient)
            .await
            .map_err(map_ingredient_repository_error)?;
        info!(ingredient_id = %ingredient.id, "ingredient added to catalogue");
        Ok(ingredient)
    }
}
