//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` with `bb8` connection pooling.
//!
//! The adapters are thin: they translate between Diesel row structs and
//! domain types and map database failures to the port error types. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay internal
//! to this module.

mod diesel_basic_error_mapping;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
