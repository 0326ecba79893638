//! Profile entity linked one-to-one with a user account.

use super::{ProfileId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Profile record owning bookkeeping timestamps for a user.
///
/// Created exactly once per user as a registration side effect; never
/// created independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted profile identifier.
    pub id: ProfileId,
    /// Owning user identifier.
    pub user_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest bookkeeping timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a fresh profile for a newly registered user.
    #[must_use]
    pub fn new(user_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProfileId::new(),
            user_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest bookkeeping timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
