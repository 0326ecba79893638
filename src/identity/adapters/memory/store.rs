//! In-memory identity store for registration and credential tests.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, User, UserId, Username},
    ports::{IdentityStore, IdentityStoreError, IdentityStoreResult, NewUser},
};

/// Thread-safe in-memory identity store.
///
/// Credentials are held as SHA-256 digests; the digest never leaves the
/// adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    users: HashMap<UserId, User>,
    digests: HashMap<UserId, String>,
    username_index: HashMap<String, UserId>,
    email_index: HashMap<String, UserId>,
}

impl InMemoryIdentityStore {
    /// Creates an empty in-memory identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn digest_password(candidate: &str) -> String {
    let digest = Sha256::digest(candidate.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn lock_error(err: impl ToString) -> IdentityStoreError {
    IdentityStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create_user(&self, new_user: NewUser) -> IdentityStoreResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.username_index.contains_key(new_user.username.as_str()) {
            return Err(IdentityStoreError::DuplicateUsername(new_user.username));
        }
        if state.email_index.contains_key(new_user.email.as_str()) {
            return Err(IdentityStoreError::DuplicateEmail(new_user.email));
        }

        let user = User::new(new_user.username, new_user.email);
        state
            .username_index
            .insert(user.username().as_str().to_owned(), user.id());
        state
            .email_index
            .insert(user.email().as_str().to_owned(), user.id());
        state
            .digests
            .insert(user.id(), digest_password(&new_user.password));
        state.users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> IdentityStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let existing = state
            .users
            .get(&user.id())
            .ok_or(IdentityStoreError::NotFound(user.id()))?
            .clone();

        let username_taken = state
            .username_index
            .get(user.username().as_str())
            .is_some_and(|holder| *holder != user.id());
        if username_taken {
            return Err(IdentityStoreError::DuplicateUsername(
                user.username().clone(),
            ));
        }
        let email_taken = state
            .email_index
            .get(user.email().as_str())
            .is_some_and(|holder| *holder != user.id());
        if email_taken {
            return Err(IdentityStoreError::DuplicateEmail(user.email().clone()));
        }

        state.username_index.remove(existing.username().as_str());
        state.email_index.remove(existing.email().as_str());
        state
            .username_index
            .insert(user.username().as_str().to_owned(), user.id());
        state
            .email_index
            .insert(user.email().as_str().to_owned(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> IdentityStoreResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> IdentityStoreResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .email_index
            .get(email.as_str())
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> IdentityStoreResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .username_index
            .get(username.as_str())
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn list(&self) -> IdentityStoreResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|left, right| left.username().as_str().cmp(right.username().as_str()));
        Ok(users)
    }

    async fn check_password(&self, id: UserId, candidate: &str) -> IdentityStoreResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        let stored = state
            .digests
            .get(&id)
            .ok_or(IdentityStoreError::NotFound(id))?;
        Ok(*stored == digest_password(candidate))
    }
}
