//! Driven port for recipe persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Recipe, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Port for writing recipes and reading them back per owner.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a validated recipe.
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError>;

    /// List recipes owned by the identifier in insertion order.
    ///
    /// An owner with no recipes yields an empty vector, never an error.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError>;
}

/// In-memory implementation backing tests and database-less deployments.
///
/// Keeps recipes in a single vector so listing preserves insertion order,
/// matching the SQL adapter's `created_at` ordering.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipePersistenceError> {
        let mut recipes = self
            .recipes
            .lock()
            .map_err(|_| RecipePersistenceError::query("recipe store lock poisoned"))?;
        recipes.push(recipe.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipePersistenceError> {
        let recipes = self
            .recipes
            .lock()
            .map_err(|_| RecipePersistenceError::query("recipe store lock poisoned"))?;
        Ok(recipes
            .iter()
            .filter(|recipe| recipe.owner() == owner)
            .cloned()
            .collect())
    }
}
