//! The identity on whose behalf an operation is requested.

use super::AccessError;
use crate::identity::domain::UserId;

/// Authenticated or anonymous request identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// No credentials were presented.
    Anonymous,
    /// A user authenticated by the credential service.
    Authenticated(UserId),
}

impl Requester {
    /// Creates an authenticated requester for the given user.
    #[must_use]
    pub const fn authenticated(user_id: UserId) -> Self {
        Self::Authenticated(user_id)
    }

    /// Returns the requester's user id, if authenticated.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user_id) => Some(*user_id),
        }
    }

    /// Returns `true` when credentials were presented.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the authenticated user id or rejects the request.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters.
    pub const fn require_authenticated(&self) -> Result<UserId, AccessError> {
        match self {
            Self::Anonymous => Err(AccessError::Unauthenticated),
            Self::Authenticated(user_id) => Ok(*user_id),
        }
    }
}
