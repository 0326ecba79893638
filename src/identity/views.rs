//! Read-side representations of identity entities.

use crate::identity::domain::{Profile, ProfileId, User, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public shape of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// Account identifier.
    pub id: UserId,
    /// Account name.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl UserView {
    /// Builds the view from a user entity.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}

/// Read-only profile shape with denormalized owner fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    /// Profile identifier.
    pub id: ProfileId,
    /// Owning account's name.
    pub user_name: String,
    /// Owning account's email address.
    pub user_email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last bookkeeping timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProfileView {
    /// Builds the view from a profile and its owning user.
    #[must_use]
    pub fn from_parts(profile: &Profile, owner: &User) -> Self {
        Self {
            id: profile.id(),
            user_name: owner.username().as_str().to_owned(),
            user_email: owner.email().as_str().to_owned(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        }
    }
}
