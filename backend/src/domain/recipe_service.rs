//! Recipe domain service.
//!
//! Implements both recipe driving ports. Every operation other than create
//! is gated by [`belongs_to`]; a recipe that is missing and one owned by
//! another user produce the same `NotFound` error.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::persistence_error_mapping::{
    map_ingredient_repository_error, map_recipe_repository_error,
};
use super::ports::{
    IngredientRepository, RecipeCommand, RecipeEditForm, RecipeQuery, RecipeRepository,
};
use super::{
    Error, Ingredient, IngredientId, PopulatedRecipe, Recipe, RecipeDraft, RecipeId, UserId,
    belongs_to,
};

const RECIPE_NOT_FOUND: &str = "recipe not found";

/// Recipe service implementing [`RecipeCommand`] and [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeService<R, I> {
    recipes: Arc<R>,
    ingredients: Arc<I>,
}

impl<R, I> RecipeService<R, I> {
    /// Create a new service with the given repositories.
    pub fn new(recipes: Arc<R>, ingredients: Arc<I>) -> Self {
        Self {
            recipes,
            ingredients,
        }
    }
}

impl<R, I> RecipeService<R, I>
where
    R: RecipeRepository,
    I: IngredientRepository,
{
    /// Load a recipe only if `requester` owns it.
    async fn fetch_owned(&self, requester: &UserId, id: &RecipeId) -> Result<Recipe, Error> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await
            .map_err(map_recipe_repository_error)?;

        match recipe {
            Some(recipe) if belongs_to(&recipe, requester) => Ok(recipe),
            Some(_) => {
                debug!(recipe_id = %id, user_id = %requester, "recipe owned by another user");
                Err(Error::not_found(RECIPE_NOT_FOUND))
            }
            None => {
                debug!(recipe_id = %id, "recipe does not exist");
                Err(Error::not_found(RECIPE_NOT_FOUND))
            }
        }
    }

    /// Reject drafts that reference ingredients missing from the catalogue.
    async fn ensure_ingredients_exist(&self, ids: &[IngredientId]) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }
        let distinct: Vec<IngredientId> = ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let found = self
            .ingredients
            .find_by_ids(&distinct)
            .await
            .map_err(map_ingredient_repository_error)?;
        let known: HashSet<IngredientId> = found.into_iter().map(|ingredient| ingredient.id).collect();

        let mut missing: Vec<IngredientId> = distinct
            .into_iter()
            .filter(|id| !known.contains(id))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
        Err(Error::invalid_request("unknown ingredient ids").with_details(
            serde_json::json!({ "field": "ingredients", "unknown": missing }),
        ))
    }

    /// Resolve ingredient references for a batch of recipes with one lookup.
    ///
    /// Order and duplicates from each recipe's id list are preserved;
    /// references to ingredients no longer in the catalogue are skipped.
    async fn populate(&self, recipes: Vec<Recipe>) -> Result<Vec<PopulatedRecipe>, Error> {
        let ids: Vec<IngredientId> = recipes
            .iter()
            .flat_map(|recipe| recipe.ingredient_ids.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let catalogue: HashMap<IngredientId, Ingredient> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.ingredients
                .find_by_ids(&ids)
                .await
                .map_err(map_ingredient_repository_error)?
                .into_iter()
                .map(|ingredient| (ingredient.id, ingredient))
                .collect()
        };

        Ok(recipes
            .into_iter()
            .map(|recipe| {
                let ingredients = recipe
                    .ingredient_ids
                    .iter()
                    .filter_map(|id| catalogue.get(id).cloned())
                    .collect();
                PopulatedRecipe {
                    recipe,
                    ingredients,
                }
            })
            .collect())
    }

    async fn populate_one(&self, recipe: Recipe) -> Result<PopulatedRecipe, Error> {
        self.populate(vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("populating a recipe produced no result"))
    }
}

#[async_trait]
impl<R, I> RecipeCommand for RecipeService<R, I>
where
    R: RecipeRepository,
    I: IngredientRepository,
{
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        self.ensure_ingredients_exist(draft.ingredient_ids()).await?;
        let recipe = draft.into_recipe(RecipeId::random(), *owner);
        self.recipes
            .insert(&recipe)
            .await
            .map_err(map_recipe_repository_error)?;
        info!(recipe_id = %recipe.id, user_id = %owner, "recipe created");
        Ok(recipe)
    }

    async fn update(
        &self,
        requester: &UserId,
        id: &RecipeId,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error> {
        let mut recipe = self.fetch_owned(requester, id).await?;
        self.ensure_ingredients_exist(draft.ingredient_ids()).await?;
        recipe.apply(draft);

        let matched = self
            .recipes
            .update_owned(&recipe)
            .await
            .map_err(map_recipe_repository_error)?;
        if !matched {
            // Deleted between the ownership check and the write.
            debug!(recipe_id = %id, "recipe vanished before update");
            return Err(Error::not_found(RECIPE_NOT_FOUND));
        }
        info!(recipe_id = %id, user_id = %requester, "recipe updated");
        Ok(recipe)
    }

    async fn delete(&self, requester: &UserId, id: &RecipeId) -> Result<(), Error> {
        let removed = self
            .recipes
            .delete_owned(id, requester)
            .await
            .map_err(map_recipe_repository_error)?;
        if removed {
            info!(recipe_id = %id, user_id = %requester, "recipe deleted");
        } else {
            debug!(recipe_id = %id, user_id = %requester, "delete matched no owned recipe");
        }
        Ok(())
    }
}

#[async_trait]
impl<R, I> RecipeQuery for RecipeService<R, I>
where
    R: RecipeRepository,
    I: IngredientRepository,
{
    async fn list(&self, requester: &UserId) -> Result<Vec<PopulatedRecipe>, Error> {
        let recipes = self
            .recipes
            .list_by_owner(requester)
            .await
            .map_err(map_recipe_repository_error)?;
        self.populate(recipes).await
    }

    async fn show(&self, requester: &UserId, id: &RecipeId) -> Result<PopulatedRecipe, Error> {
        let recipe = self.fetch_owned(requester, id).await?;
        self.populate_one(recipe).await
    }

    async fn edit_form(&self, requester: &UserId, id: &RecipeId) -> Result<RecipeEditForm, Error> {
        let recipe = self.show(requester, id).await?;
        let catalogue = self
            .ingredients
            .list_all()
            .await
            .map_err(map_ingredient_repository_error)?;
        Ok(RecipeEditForm { recipe, catalogue })
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
