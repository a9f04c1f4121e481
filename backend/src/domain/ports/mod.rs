//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod recipe_ledger;
mod recipe_repository;
mod user_directory;
mod user_repository;

pub use recipe_ledger::RecipeLedger;
pub use recipe_repository::{InMemoryRecipeRepository, RecipePersistenceError, RecipeRepository};
pub use user_directory::{SignupRequest, UserDirectory};
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
