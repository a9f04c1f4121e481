//! User directory service.
//!
//! Implements the [`UserDirectory`] driving port over a [`UserRepository`].
//! Validation runs synchronously before persistence is attempted; store-level
//! uniqueness conflicts are translated to unprocessable errors rather than
//! leaking as infrastructure failures.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{SignupRequest, UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{Error, PasswordDigest, User, UserId, Username};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::unprocessable("Username must be unique")
        }
    }
}

/// Directory service backed by a user repository.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    users: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a new directory over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn signup(&self, request: SignupRequest) -> Result<User, Error> {
        let SignupRequest {
            username,
            password,
            image_url,
            bio,
        } = request;

        let username = Username::new(username).map_err(|err| Error::unprocessable(err.to_string()))?;
        let digest =
            PasswordDigest::derive(&password).map_err(|err| Error::internal(err.to_string()))?;

        let user = User::new(UserId::random(), username, digest, image_url, bio);
        self.users
            .create(&user)
            .await
            .map_err(map_repository_error)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_repository_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_repository_error)
    }
}
