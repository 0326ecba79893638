//! Repository port for profile persistence.

use crate::identity::domain::{Profile, ProfileId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a new profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateProfile`] when the owning
    /// user already has a profile.
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Persists changes to an existing profile's timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when the profile does
    /// not exist.
    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()>;

    /// Finds a profile by identifier.
    ///
    /// Returns `None` when the profile does not exist.
    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>>;

    /// Finds the profile owned by the given user.
    ///
    /// Returns `None` when the user has no profile.
    async fn find_by_user(&self, user_id: UserId) -> ProfileRepositoryResult<Option<Profile>>;

    /// Returns all profiles, newest first.
    async fn list(&self) -> ProfileRepositoryResult<Vec<Profile>>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// The user already has a profile.
    #[error("duplicate profile for user: {0}")]
    DuplicateProfile(UserId),

    /// The profile was not found.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
