//! Driving port for recipe creation and ownership-filtered listing.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, UserId};

/// Domain use-case port for the recipe ledger.
#[async_trait]
pub trait RecipeLedger: Send + Sync {
    /// Validate the draft and persist it bound to the owner.
    ///
    /// Validation failures carry every violated rule so the handler can
    /// return the full message list; nothing is persisted on failure.
    async fn create(&self, draft: RecipeDraft, owner: UserId) -> Result<Recipe, Error>;

    /// List recipes owned by the identifier in insertion order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, Error>;
}
