//! Builders selecting port implementations for the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::{RecipeLedgerService, UserDirectoryService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DieselRecipeRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the shared HTTP state from configured ports.
///
/// Uses the Diesel-backed repositories when a pool is available, otherwise
/// in-memory stores so the server also runs database-less (tests, demos).
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => web::Data::new(HttpState::new(
            Arc::new(UserDirectoryService::new(Arc::new(
                DieselUserRepository::new(pool.clone()),
            ))),
            Arc::new(RecipeLedgerService::new(Arc::new(
                DieselRecipeRepository::new(pool.clone()),
            ))),
        )),
        None => web::Data::new(HttpState::in_memory()),
    }
}
