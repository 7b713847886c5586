//! PostgreSQL-backed `IngredientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{Ingredient, IngredientId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed implementation of the `IngredientRepository` port.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngredientRepositoryError {
    map_basic_pool_error(error, IngredientRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IngredientRepositoryError {
    map_basic_diesel_error(
        error,
        IngredientRepositoryError::query,
        IngredientRepositoryError::connection,
    )
}

fn row_to_ingredient(row: IngredientRow) -> Ingredient {
    Ingredient {
        id: IngredientId::from_uuid(row.id),
        name: row.name,
        category: row.category,
    }
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn list_all(&self) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .select(IngredientRow::as_select())
            .order_by((ingredients::created_at, ingredients::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_ingredient).collect())
    }

    async fn find_by_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(uuids))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_ingredient).collect())
    }

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewIngredientRow {
            id: *ingredient.id.as_uuid(),
            name: &ingredient.name,
            category: ingredient.category.as_deref(),
        };

        diesel::insert_into(ingredients::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
