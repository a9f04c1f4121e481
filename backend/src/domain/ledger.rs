//! Recipe ledger service.
//!
//! Implements the [`RecipeLedger`] driving port over a [`RecipeRepository`].
//! Drafts are validated before any write so a rejected create leaves the
//! store untouched; the repository handles transactional rollback for writes
//! it has already started.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RecipeLedger, RecipePersistenceError, RecipeRepository};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, UserId};

fn map_repository_error(error: RecipePersistenceError) -> Error {
    match error {
        RecipePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipePersistenceError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

/// Ledger service backed by a recipe repository.
#[derive(Clone)]
pub struct RecipeLedgerService<R> {
    recipes: Arc<R>,
}

impl<R> RecipeLedgerService<R> {
    /// Create a new ledger over the given repository.
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }
}

#[async_trait]
impl<R> RecipeLedger for RecipeLedgerService<R>
where
    R: RecipeRepository,
{
    async fn create(&self, draft: RecipeDraft, owner: UserId) -> Result<Recipe, Error> {
        let recipe = Recipe::from_draft(RecipeId::random(), draft, owner).map_err(|violations| {
            Error::validation(violations.iter().map(ToString::to_string).collect())
        })?;

        self.recipes
            .create(&recipe)
            .await
            .map_err(map_repository_error)?;

        Ok(recipe)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .list_by_owner(owner)
            .await
            .map_err(map_repository_error)
    }
}
