//! Driven port for user persistence adapters and their errors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's unique index rejected the username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Port for writing and reading user records.
///
/// Creates run inside a store transaction so a rejected insert leaves no
/// partial row behind.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `DuplicateUsername` when the unique
    /// index rejects the insert.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory implementation backing tests and database-less deployments.
///
/// Enforces the same username uniqueness the SQL index provides so callers
/// observe identical conflict behaviour.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users. Used by tests asserting no partial writes.
    ///
    /// # Panics
    /// Panics if the interior lock is poisoned.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.lock().expect("user store lock poisoned").len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        let key = user.username().as_ref().to_owned();
        if users.contains_key(&key) {
            return Err(UserPersistenceError::duplicate_username(key));
        }
        users.insert(key, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        Ok(users.values().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        Ok(users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::{PasswordDigest, Username};

    fn build_user(username: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(username).expect("valid username"),
            PasswordDigest::derive("pw1").expect("digest derivation"),
            None,
            None,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_lookup_round_trips() {
        let repo = InMemoryUserRepository::new();
        let user = build_user("alice");

        repo.create(&user).await.expect("create succeeds");

        let by_name = repo
            .find_by_username("alice")
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(by_name.id(), user.id());

        let by_id = repo
            .find_by_id(user.id())
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(by_id.username().as_ref(), "alice");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_rejected_without_a_second_record() {
        let repo = InMemoryUserRepository::new();
        repo.create(&build_user("alice")).await.expect("first create");

        let err = repo
            .create(&build_user("alice"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(
            err,
            UserPersistenceError::DuplicateUsername { .. }
        ));
        assert_eq!(repo.user_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_lookups_return_none() {
        let repo = InMemoryUserRepository::new();
        assert!(
            repo.find_by_username("ghost")
                .await
                .expect("lookup succeeds")
                .is_none()
        );
        assert!(
            repo.find_by_id(&UserId::random())
                .await
                .expect("lookup succeeds")
                .is_none()
        );
    }
}
