//! Diesel row models for identity persistence.

use super::schema::{profiles, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::identity::domain::{
    EmailAddress, IdentityDomainError, PersistedProfileData, PersistedUserData, Profile, ProfileId,
    User, UserId, Username,
};

/// Query result row for user accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Account name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Credential digest.
    pub password_digest: String,
    /// Active flag.
    pub is_active: bool,
}

/// Insert model for user accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Account name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Credential digest.
    pub password_digest: String,
    /// Active flag.
    pub is_active: bool,
}

/// Query result row for profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Profile identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last bookkeeping timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for profiles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfileRow {
    /// Profile identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last bookkeeping timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Converts a stored user row back into the domain entity.
///
/// # Errors
///
/// Returns [`IdentityDomainError`] when stored values no longer satisfy the
/// domain's scalar invariants.
pub fn row_to_user(row: UserRow) -> Result<User, IdentityDomainError> {
    let UserRow {
        id,
        username,
        email,
        password_digest: _,
        is_active,
    } = row;
    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(id),
        username: Username::new(username)?,
        email: EmailAddress::new(email)?,
        is_active,
    }))
}

/// Converts a stored profile row back into the domain entity.
#[must_use]
pub fn row_to_profile(row: ProfileRow) -> Profile {
    Profile::from_persisted(PersistedProfileData {
        id: ProfileId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Builds an insert row from a profile entity.
#[must_use]
pub fn profile_to_new_row(profile: &Profile) -> NewProfileRow {
    NewProfileRow {
        id: profile.id().into_inner(),
        user_id: profile.user_id().into_inner(),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}
