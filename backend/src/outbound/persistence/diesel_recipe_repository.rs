//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RecipePersistenceError, RecipeRepository};
use crate::domain::{Recipe, RecipeId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRecipeRow, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the recipe repository port.
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

fn map_pool_error(error: PoolError) -> RecipePersistenceError {
    map_basic_pool_error(error, RecipePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipePersistenceError {
    map_basic_diesel_error(
        error,
        RecipePersistenceError::query,
        RecipePersistenceError::connection,
    )
}

fn row_to_recipe(row: RecipeRow) -> Recipe {
    let RecipeRow {
        id,
        user_id,
        title,
        instructions,
        minutes_to_complete,
        ..
    } = row;

    Recipe::from_parts(
        RecipeId::from_uuid(id),
        title,
        instructions,
        minutes_to_complete,
        UserId::from_uuid(user_id),
    )
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRecipeRow {
            id: *recipe.id().as_uuid(),
            user_id: *recipe.owner().as_uuid(),
            title: recipe.title(),
            instructions: recipe.instructions(),
            minutes_to_complete: recipe.minutes_to_complete(),
        };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(recipes::table)
                    .values(&new_row)
                    .execute(conn)
                    .await
                    .map(|_| ())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = recipes::table
            .filter(recipes::user_id.eq(owner.as_uuid()))
            .order((recipes::created_at.asc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load::<RecipeRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_recipe).collect())
    }
}
