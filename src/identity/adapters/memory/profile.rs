//! In-memory profile repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Profile, ProfileId, UserId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<InMemoryProfileState>>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    profiles: HashMap<ProfileId, Profile>,
    user_index: HashMap<UserId, ProfileId>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory profile repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.user_index.contains_key(&profile.user_id()) {
            return Err(ProfileRepositoryError::DuplicateProfile(profile.user_id()));
        }
        state.user_index.insert(profile.user_id(), profile.id());
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.profiles.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::NotFound(profile.id()));
        }
        state.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        let profile = state
            .user_index
            .get(&user_id)
            .and_then(|profile_id| state.profiles.get(profile_id))
            .cloned();
        Ok(profile)
    }

    async fn list(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut profiles: Vec<Profile> = state.profiles.values().cloned().collect();
        profiles.sort_by_key(|profile| std::cmp::Reverse(profile.created_at()));
        Ok(profiles)
    }
}
