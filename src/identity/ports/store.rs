//! Identity store port: the external account and credential service.

use crate::identity::domain::{EmailAddress, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity store operations.
pub type IdentityStoreResult<T> = Result<T, IdentityStoreError>;

/// New-account payload handed to the identity store.
///
/// The plaintext password is consumed by the store, which owns hashing and
/// never exposes the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Validated account name.
    pub username: Username,
    /// Validated email address.
    pub email: EmailAddress,
    /// Plaintext credential, digested inside the store.
    pub password: String,
}

/// Account and credential service contract.
///
/// Username and email uniqueness are enforced atomically by the store.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Creates a new account with its credential.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::DuplicateUsername`] or
    /// [`IdentityStoreError::DuplicateEmail`] when the unique constraints
    /// reject the account.
    async fn create_user(&self, new_user: NewUser) -> IdentityStoreResult<User>;

    /// Persists changes to an existing account's identity fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::NotFound`] when the account does not
    /// exist, or a duplicate error when a changed username/email collides.
    async fn update_user(&self, user: &User) -> IdentityStoreResult<()>;

    /// Finds an account by identifier.
    ///
    /// Returns `None` when the account does not exist.
    async fn find_by_id(&self, id: UserId) -> IdentityStoreResult<Option<User>>;

    /// Finds an account by email address.
    ///
    /// Returns `None` when no account holds the address.
    async fn find_by_email(&self, email: &EmailAddress) -> IdentityStoreResult<Option<User>>;

    /// Finds an account by username.
    ///
    /// Returns `None` when no account holds the name.
    async fn find_by_username(&self, username: &Username) -> IdentityStoreResult<Option<User>>;

    /// Returns all accounts, ordered by username.
    async fn list(&self) -> IdentityStoreResult<Vec<User>>;

    /// Verifies a plaintext candidate against the stored credential.
    ///
    /// Returns `false` for a wrong password; absence of the account is an
    /// error, not a failed check.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::NotFound`] when the account does not
    /// exist.
    async fn check_password(&self, id: UserId, candidate: &str) -> IdentityStoreResult<bool>;
}

/// Errors returned by identity store implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityStoreError {
    /// An account with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// An account with the same email address already exists.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(EmailAddress),

    /// The account was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
