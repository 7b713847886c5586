//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! `update_owned` and `delete_owned` filter on both `id` and `owner_id` in a
//! single statement, so the ownership check and the write cannot interleave
//! with another request.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{IngredientId, Recipe, RecipeId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRecipeRow, RecipeRow, RecipeUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the `RecipeRepository` port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_basic_pool_error(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn row_to_recipe(row: RecipeRow) -> Recipe {
    Recipe {
        id: RecipeId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        name: row.name,
        instructions: row.instructions,
        ingredient_ids: row
            .ingredient_ids
            .into_iter()
            .map(IngredientId::from_uuid)
            .collect(),
    }
}

fn ingredient_uuids(recipe: &Recipe) -> Vec<Uuid> {
    recipe.ingredient_ids.iter().map(|id| *id.as_uuid()).collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::owner_id.eq(owner.as_uuid()))
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at, recipes::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_recipe).collect())
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.as_uuid()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_recipe))
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRecipeRow {
            id: *recipe.id.as_uuid(),
            owner_id: *recipe.owner.as_uuid(),
            name: &recipe.name,
            instructions: &recipe.instructions,
            ingredient_ids: ingredient_uuids(recipe),
        };

        diesel::insert_into(recipes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_owned(&self, recipe: &Recipe) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = RecipeUpdate {
            name: &recipe.name,
            instructions: &recipe.instructions,
            ingredient_ids: ingredient_uuids(recipe),
            updated_at: Utc::now(),
        };

        let updated = diesel::update(
            recipes::table
                .filter(recipes::id.eq(recipe.id.as_uuid()))
                .filter(recipes::owner_id.eq(recipe.owner.as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete_owned(
        &self,
        id: &RecipeId,
        owner: &UserId,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            recipes::table
                .filter(recipes::id.eq(id.as_uuid()))
                .filter(recipes::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_keep_ingredient_order_and_duplicates() {
        let salt = Uuid::new_v4();
        let leek = Uuid::new_v4();
        let row = RecipeRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Soup".to_owned(),
            instructions: "Boil".to_owned(),
            ingredient_ids: vec![leek, salt, leek],
        };
        let owner = row.owner_id;

        let recipe = row_to_recipe(row);

        assert_eq!(recipe.owner.as_uuid(), &owner);
        assert_eq!(
            recipe.ingredient_ids,
            vec![
                IngredientId::from_uuid(leek),
                IngredientId::from_uuid(salt),
                IngredientId::from_uuid(leek),
            ]
        );
        assert_eq!(ingredient_uuids(&recipe), vec![leek, salt, leek]);
    }
}
