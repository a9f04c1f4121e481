//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    InMemoryRecipeRepository, InMemoryUserRepository, RecipeLedger, UserDirectory,
};
use crate::domain::{RecipeLedgerService, UserDirectoryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User signup and lookup use-cases.
    pub directory: Arc<dyn UserDirectory>,
    /// Recipe creation and ownership-filtered listing use-cases.
    pub recipes: Arc<dyn RecipeLedger>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>, recipes: Arc<dyn RecipeLedger>) -> Self {
        Self { directory, recipes }
    }

    /// State backed by fresh in-memory repositories.
    ///
    /// Used by tests and database-less deployments; each call creates an
    /// isolated store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(UserDirectoryService::new(Arc::new(
                InMemoryUserRepository::new(),
            ))),
            Arc::new(RecipeLedgerService::new(Arc::new(
                InMemoryRecipeRepository::new(),
            ))),
        )
    }
}
