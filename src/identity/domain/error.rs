//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the storage limit.
    #[error("username must be at most {0} characters")]
    UsernameTooLong(usize),

    /// The username contains characters outside the allowed set.
    #[error("invalid username '{0}', expected letters, digits and @.+-_ only")]
    InvalidUsername(String),

    /// The email address is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email address exceeds the storage limit.
    #[error("email must be at most {0} characters")]
    EmailTooLong(usize),

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Registration-facing validation failures, field-scoped and collected.
///
/// All applicable violations are gathered before a registration attempt
/// fails; callers receive either a single variant or a
/// [`ValidationError::Multiple`] bundle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Password and confirmation differ.
    #[error("Passwords must match.")]
    PasswordMismatch,

    /// The credential service's strength policy rejected the password.
    #[error("{0}")]
    PasswordPolicy(String),

    /// The email address is already registered.
    #[error("Email already taken.")]
    EmailTaken,

    /// The username is already registered.
    #[error("Username already taken.")]
    UsernameTaken,

    /// The username is malformed.
    #[error("{0}")]
    InvalidUsername(String),

    /// The email address is malformed.
    #[error("{0}")]
    InvalidEmail(String),

    /// Multiple validation errors occurred.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Combines multiple validation errors into a single error.
    ///
    /// If only one error is provided, returns it directly rather than
    /// wrapping.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if called with an empty vector, as this
    /// indicates a logic error in the caller.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Self {
        match errors.len() {
            0 => {
                debug_assert!(false, "multiple() called with empty errors vector");
                Self::InvalidUsername("internal error: no validation errors".into())
            }
            1 => errors.into_iter().next().unwrap_or_else(|| {
                Self::InvalidUsername("internal error: no validation errors".into())
            }),
            _ => Self::Multiple(errors),
        }
    }

    /// Returns `Ok(())` when no violations were collected, otherwise the
    /// combined error.
    ///
    /// # Errors
    ///
    /// Returns the single violation, or a [`ValidationError::Multiple`]
    /// bundle when more than one was collected.
    pub fn collect(errors: Vec<Self>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::multiple(errors))
        }
    }

    /// Returns the field this violation is scoped to.
    ///
    /// `None` for [`ValidationError::Multiple`]; use [`Self::field_messages`]
    /// to flatten a bundle.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::PasswordMismatch | Self::PasswordPolicy(_) => Some("password"),
            Self::EmailTaken | Self::InvalidEmail(_) => Some("email"),
            Self::UsernameTaken | Self::InvalidUsername(_) => Some("username"),
            Self::Multiple(_) => None,
        }
    }

    /// Flattens this error into `(field, message)` pairs.
    #[must_use]
    pub fn field_messages(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Multiple(errors) => errors.iter().flat_map(Self::field_messages).collect(),
            other => other
                .field()
                .map(|field| (field, other.to_string()))
                .into_iter()
                .collect(),
        }
    }

    /// Returns `true` if this error represents multiple validation failures.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns the individual errors if this is a `Multiple` variant.
    #[must_use]
    pub fn errors(&self) -> Option<&[Self]> {
        match self {
            Self::Multiple(errors) => Some(errors),
            _ => None,
        }
    }
}
