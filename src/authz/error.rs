//! Error types for authorization decisions.

use thiserror::Error;

/// Errors surfaced when an access check fails.
///
/// [`AccessError::Unauthenticated`] maps to a 401-equivalent response and
/// [`AccessError::Forbidden`] to a 403-equivalent one; callers rely on the
/// distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The requester is not authenticated at all.
    #[error("Authentication credentials were not provided.")]
    Unauthenticated,

    /// The requester is authenticated but the object-level policy denies
    /// the operation.
    #[error("You do not have permission to perform this action.")]
    Forbidden,
}
