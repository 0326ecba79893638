//! `PostgreSQL` profile repository implementation.

use super::{
    models::{ProfileRow, profile_to_new_row, row_to_profile},
    schema::profiles,
    store::IdentityPgPool,
};
use crate::identity::{
    domain::{Profile, ProfileId, UserId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: IdentityPgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let row = profile_to_new_row(profile);
        let user_id = profile.user_id();
        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(user_id)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let updated_at = profile.updated_at();
        self.run_blocking(move |connection| {
            let updated =
                diesel::update(profiles::table.filter(profiles::id.eq(profile_id.into_inner())))
                    .set(profiles::updated_at.eq(updated_at))
                    .execute(connection)
                    .map_err(ProfileRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProfileRepositoryError::NotFound(profile_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::id.eq(id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(row.map(row_to_profile))
        })
        .await
    }

    async fn find_by_user(&self, user_id: UserId) -> ProfileRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            let row = profiles::table
                .filter(profiles::user_id.eq(user_id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(row.map(row_to_profile))
        })
        .await
    }

    async fn list(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        self.run_blocking(|connection| {
            let rows = profiles::table
                .order(profiles::created_at.desc())
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_profile).collect())
        })
        .await
    }
}
