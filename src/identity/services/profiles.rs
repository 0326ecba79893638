//! Profile listing and timestamp bookkeeping.

use crate::authz::{AccessError, Operation, OwnerOrReadOnly, Requester, enforce};
use crate::identity::{
    domain::{Profile, ProfileId, UserId},
    ports::{IdentityStore, IdentityStoreError, ProfileRepository, ProfileRepositoryError},
    views::ProfileView,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The profile does not exist.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),
    /// The profile's owning account is missing from the identity store.
    #[error("profile owner not found: {0}")]
    OwnerMissing(UserId),
    /// Profile persistence failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
    /// Identity store operation failed.
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile read and bookkeeping orchestration.
///
/// Profiles expose no user-editable fields; the only mutation is the
/// owner-gated timestamp bump.
#[derive(Clone)]
pub struct ProfileService<R, S, C>
where
    R: ProfileRepository,
    S: IdentityStore,
    C: Clock + Send + Sync,
{
    profiles: Arc<R>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> ProfileService<R, S, C>
where
    R: ProfileRepository,
    S: IdentityStore,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(profiles: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            profiles,
            store,
            clock,
        }
    }

    /// Returns all profiles as denormalized views, newest first.
    ///
    /// Reads are public; no authentication gate applies.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::OwnerMissing`] when a profile's owner
    /// has vanished from the identity store, or a persistence error.
    pub async fn list(&self) -> ProfileServiceResult<Vec<ProfileView>> {
        let profiles = self.profiles.list().await?;
        let mut views = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            views.push(self.render(profile).await?);
        }
        Ok(views)
    }

    /// Fetches a single profile as a denormalized view.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when the profile does not
    /// exist.
    pub async fn get(&self, id: ProfileId) -> ProfileServiceResult<ProfileView> {
        let profile = self
            .profiles
            .find_by_id(id)
            .await?
            .ok_or(ProfileServiceError::NotFound(id))?;
        self.render(&profile).await
    }

    /// Bumps a profile's `updated_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] when the requester does not own
    /// the profile, or [`ProfileServiceError::NotFound`] when it does not
    /// exist.
    pub async fn touch(
        &self,
        requester: &Requester,
        id: ProfileId,
    ) -> ProfileServiceResult<Profile> {
        requester.require_authenticated()?;
        let mut profile = self
            .profiles
            .find_by_id(id)
            .await?
            .ok_or(ProfileServiceError::NotFound(id))?;
        enforce(&OwnerOrReadOnly, requester, Operation::PartialUpdate, &profile)?;
        profile.touch(&*self.clock);
        self.profiles.update(&profile).await?;
        Ok(profile)
    }

    async fn render(&self, profile: &Profile) -> ProfileServiceResult<ProfileView> {
        let owner = self
            .store
            .find_by_id(profile.user_id())
            .await?
            .ok_or(ProfileServiceError::OwnerMissing(profile.user_id()))?;
        Ok(ProfileView::from_parts(profile, &owner))
    }
}
