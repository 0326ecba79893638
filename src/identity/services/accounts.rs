//! Account directory and self-service updates.

use crate::authz::{AccessError, Operation, Requester, SelfOrReadOnly, enforce};
use crate::identity::{
    domain::{EmailAddress, User, UserId, Username, ValidationError},
    ports::{IdentityStore, IdentityStoreError},
};
use std::sync::Arc;
use thiserror::Error;

/// Partial update to a user's identity fields.
///
/// Omitted fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    username: Option<String>,
    email: Option<String>,
}

impl UserChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new account name.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets a new email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// One or more change fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The target account does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Identity store operation failed.
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Account listing, lookup, and self-service update orchestration.
#[derive(Clone)]
pub struct AccountService<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
}

impl<S> AccountService<S>
where
    S: IdentityStore,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns all accounts, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters,
    /// or a store error when the lookup fails.
    pub async fn list(&self, requester: &Requester) -> AccountServiceResult<Vec<User>> {
        requester.require_authenticated()?;
        Ok(self.store.list().await?)
    }

    /// Fetches a single account.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters or
    /// [`AccountServiceError::NotFound`] when the account does not exist.
    pub async fn get(&self, requester: &Requester, id: UserId) -> AccountServiceResult<User> {
        requester.require_authenticated()?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AccountServiceError::NotFound(id))
    }

    /// Applies a partial update to an account.
    ///
    /// Only the account holder may mutate it; uniqueness of a changed
    /// username or email is re-checked against the store.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] when the requester is not the
    /// target account, [`AccountServiceError::Validation`] when a changed
    /// field is rejected, or [`AccountServiceError::NotFound`] when the
    /// target does not exist.
    pub async fn update(
        &self,
        requester: &Requester,
        target: UserId,
        changes: UserChanges,
    ) -> AccountServiceResult<User> {
        requester.require_authenticated()?;
        let mut user = self
            .store
            .find_by_id(target)
            .await?
            .ok_or(AccountServiceError::NotFound(target))?;
        enforce(&SelfOrReadOnly, requester, Operation::PartialUpdate, &user)?;

        let mut violations = Vec::new();
        let parsed_username = match changes.username {
            Some(raw) => match Username::new(raw) {
                Ok(parsed) => {
                    let holder = self.store.find_by_username(&parsed).await?;
                    if holder.is_some_and(|other| other.id() != user.id()) {
                        violations.push(ValidationError::UsernameTaken);
                        None
                    } else {
                        Some(parsed)
                    }
                }
                Err(err) => {
                    violations.push(ValidationError::InvalidUsername(err.to_string()));
                    None
                }
            },
            None => None,
        };
        let parsed_email = match changes.email {
            Some(raw) => match EmailAddress::new(raw) {
                Ok(parsed) => {
                    let holder = self.store.find_by_email(&parsed).await?;
                    if holder.is_some_and(|other| other.id() != user.id()) {
                        violations.push(ValidationError::EmailTaken);
                        None
                    } else {
                        Some(parsed)
                    }
                }
                Err(err) => {
                    violations.push(ValidationError::InvalidEmail(err.to_string()));
                    None
                }
            },
            None => None,
        };
        ValidationError::collect(violations)?;

        if let Some(username) = parsed_username {
            user.rename(username);
        }
        if let Some(email) = parsed_email {
            user.change_email(email);
        }
        self.store.update_user(&user).await?;
        Ok(user)
    }
}
