//! Registration and credential-check orchestration.

use crate::identity::{
    domain::{EmailAddress, Profile, User, Username, ValidationError},
    ports::{
        IdentityStore, IdentityStoreError, NewUser, PasswordPolicy, ProfileRepository,
        ProfileRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

impl RegisterRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

/// Service-level errors for registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// One or more request fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Identity store operation failed.
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
    /// Profile persistence failed.
    #[error(transparent)]
    Profile(#[from] ProfileRepositoryError),
}

/// Result type for registration service operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors returned when a credential check fails.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The email is unknown or the password is wrong.
    #[error("Invalid credentials.")]
    InvalidCredentials,
    /// The account exists but may not authenticate.
    #[error("Account disabled.")]
    AccountDisabled,
    /// Identity store operation failed.
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
}

/// Registration and credential-check orchestration service.
///
/// Wraps the external identity store; profile creation is the explicit
/// post-creation hook invoked here, never an implicit side effect of the
/// store itself.
#[derive(Clone)]
pub struct RegistrationService<S, R, C>
where
    S: IdentityStore,
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    profiles: Arc<R>,
    password_policy: Arc<dyn PasswordPolicy>,
    clock: Arc<C>,
}

impl<S, R, C> RegistrationService<S, R, C>
where
    S: IdentityStore,
    R: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        profiles: Arc<R>,
        password_policy: Arc<dyn PasswordPolicy>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            profiles,
            password_policy,
            clock,
        }
    }

    /// Registers a new account and creates its profile.
    ///
    /// Every applicable violation is collected before the request fails;
    /// callers receive the full field-to-message mapping in one error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Validation`] when any field is rejected,
    /// or a store/profile error when persistence fails.
    pub async fn register(&self, request: RegisterRequest) -> RegistrationResult<User> {
        let mut violations = Vec::new();

        let parsed_username = match Username::new(&request.username) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                violations.push(ValidationError::InvalidUsername(err.to_string()));
                None
            }
        };
        let parsed_email = match EmailAddress::new(&request.email) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                violations.push(ValidationError::InvalidEmail(err.to_string()));
                None
            }
        };

        if request.password != request.confirm_password {
            violations.push(ValidationError::PasswordMismatch);
        }
        if let Err(violation) = self.password_policy.validate(&request.password) {
            violations.push(ValidationError::PasswordPolicy(violation.to_string()));
        }

        if let Some(parsed) = parsed_email.as_ref()
            && self.store.find_by_email(parsed).await?.is_some()
        {
            violations.push(ValidationError::EmailTaken);
        }
        if let Some(parsed) = parsed_username.as_ref()
            && self.store.find_by_username(parsed).await?.is_some()
        {
            violations.push(ValidationError::UsernameTaken);
        }

        let (Some(username), Some(email)) = (parsed_username, parsed_email) else {
            return Err(ValidationError::multiple(violations).into());
        };
        ValidationError::collect(violations)?;

        let user = self
            .store
            .create_user(NewUser {
                username,
                email,
                password: request.password,
            })
            .await?;

        // Post-creation hook: every account gets exactly one profile.
        let profile = Profile::new(user.id(), &*self.clock);
        self.profiles.store(&profile).await?;

        Ok(user)
    }

    /// Verifies an email/password pair against the identity store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::InvalidCredentials`] for an unknown
    /// email or wrong password, and
    /// [`AuthenticationError::AccountDisabled`] for inactive accounts.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthenticationError> {
        let Ok(parsed) = EmailAddress::new(email) else {
            return Err(AuthenticationError::InvalidCredentials);
        };
        let Some(user) = self.store.find_by_email(&parsed).await? else {
            return Err(AuthenticationError::InvalidCredentials);
        };
        if !self.store.check_password(user.id(), password).await? {
            return Err(AuthenticationError::InvalidCredentials);
        }
        if !user.is_active() {
            return Err(AuthenticationError::AccountDisabled);
        }
        Ok(user)
    }
}
