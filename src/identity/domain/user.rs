//! User account entity and validated credential-adjacent scalars.

use super::{IdentityDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated account name.
///
/// Mirrors the conventional account-name contract: trimmed, non-empty, at
/// most 150 characters, letters and digits plus `@`, `.`, `+`, `-`, `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum stored length in characters.
    pub const MAX_LENGTH: usize = 150;

    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyUsername`],
    /// [`IdentityDomainError::UsernameTooLong`], or
    /// [`IdentityDomainError::InvalidUsername`] when the value is malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyUsername);
        }
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(IdentityDomainError::UsernameTooLong(Self::MAX_LENGTH));
        }
        let is_allowed =
            |character: char| character.is_alphanumeric() || "@.+-_".contains(character);
        if !normalized.chars().all(is_allowed) {
            return Err(IdentityDomainError::InvalidUsername(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Maximum stored length in characters.
    pub const MAX_LENGTH: usize = 254;

    /// Creates a validated email address.
    ///
    /// Validation is deliberately shallow: a non-empty local part, a single
    /// `@`, and a domain containing a dot. Deliverability is the mail
    /// system's problem.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyEmail`],
    /// [`IdentityDomainError::EmailTooLong`], or
    /// [`IdentityDomainError::InvalidEmail`] when the value is malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyEmail);
        }
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(IdentityDomainError::EmailTooLong(Self::MAX_LENGTH));
        }
        let is_valid = normalized.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !normalized.chars().any(char::is_whitespace)
        });
        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the email address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User account entity.
///
/// Credential material (password digests) never appears here; it stays
/// inside the identity store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    is_active: bool,
}

/// Parameter object for reconstructing a persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted account name.
    pub username: Username,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted active flag.
    pub is_active: bool,
}

impl User {
    /// Creates a new active user account.
    #[must_use]
    pub fn new(username: Username, email: EmailAddress) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            is_active: true,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            is_active: data.is_active,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns `true` when the account may authenticate.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Replaces the account name.
    pub fn rename(&mut self, username: Username) {
        self.username = username;
    }

    /// Replaces the email address.
    pub fn change_email(&mut self, email: EmailAddress) {
        self.email = email;
    }

    /// Marks the account as unable to authenticate.
    pub const fn deactivate(&mut self) {
        self.is_active = false;
    }
}
