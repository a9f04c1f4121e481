//! Driving port for user signup and lookups.
//!
//! Inbound adapters call this port to create and resolve users without
//! importing outbound persistence concerns, keeping handler tests
//! deterministic behind a test double.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Signup fields as collected by the inbound adapter.
///
/// `password` carries the raw plaintext for digest derivation; it is consumed
/// by the directory and never stored.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Requested unique login name.
    pub username: String,
    /// Plaintext password to be digested.
    pub password: String,
    /// Optional profile image URL.
    pub image_url: Option<String>,
    /// Optional short biography.
    pub bio: Option<String>,
}

/// Domain use-case port for the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Validate the request, derive the password digest, and persist the
    /// user. Uniqueness conflicts surface as unprocessable errors, never as
    /// raw infrastructure failures.
    async fn signup(&self, request: SignupRequest) -> Result<User, Error>;

    /// Resolve a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Resolve a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error>;
}
