//! `PostgreSQL` identity store implementation.

use super::{
    models::{NewUserRow, UserRow, row_to_user},
    schema::users,
};
use crate::identity::{
    domain::{EmailAddress, User, UserId, Username},
    ports::{IdentityStore, IdentityStoreError, IdentityStoreResult, NewUser},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use sha2::{Digest, Sha256};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type IdentityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed identity store.
#[derive(Debug, Clone)]
pub struct PostgresIdentityStore {
    pool: IdentityPgPool,
}

impl PostgresIdentityStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IdentityStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IdentityStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IdentityStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IdentityStoreError::persistence)?
    }
}

fn digest_password(candidate: &str) -> String {
    let digest = Sha256::digest(candidate.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn is_username_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "users_username_key")
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn create_user(&self, new_user: NewUser) -> IdentityStoreResult<User> {
        let user = User::new(new_user.username, new_user.email);
        let row = NewUserRow {
            id: user.id().into_inner(),
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            password_digest: digest_password(&new_user.password),
            is_active: user.is_active(),
        };

        let username = user.username().clone();
        let email = user.email().clone();
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_username_unique_violation(info.as_ref()) =>
                    {
                        IdentityStoreError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IdentityStoreError::DuplicateEmail(email.clone())
                    }
                    _ => IdentityStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await?;
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> IdentityStoreResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let email = user.email().clone();
        let new_username = username.as_str().to_owned();
        let new_email = email.as_str().to_owned();
        let is_active = user.is_active();

        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set((
                    users::username.eq(new_username),
                    users::email.eq(new_email),
                    users::is_active.eq(is_active),
                ))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_username_unique_violation(info.as_ref()) =>
                    {
                        IdentityStoreError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IdentityStoreError::DuplicateEmail(email.clone())
                    }
                    _ => IdentityStoreError::persistence(err),
                })?;
            if updated == 0 {
                return Err(IdentityStoreError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> IdentityStoreResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(IdentityStoreError::persistence)?;
            row.map(|found| row_to_user(found).map_err(IdentityStoreError::persistence))
                .transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> IdentityStoreResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(IdentityStoreError::persistence)?;
            row.map(|found| row_to_user(found).map_err(IdentityStoreError::persistence))
                .transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> IdentityStoreResult<Option<User>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(IdentityStoreError::persistence)?;
            row.map(|found| row_to_user(found).map_err(IdentityStoreError::persistence))
                .transpose()
        })
        .await
    }

    async fn list(&self) -> IdentityStoreResult<Vec<User>> {
        self.run_blocking(|connection| {
            let rows = users::table
                .order(users::username.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(IdentityStoreError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_user(row).map_err(IdentityStoreError::persistence))
                .collect()
        })
        .await
    }

    async fn check_password(&self, id: UserId, candidate: &str) -> IdentityStoreResult<bool> {
        let candidate_digest = digest_password(candidate);
        self.run_blocking(move |connection| {
            let stored = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(users::password_digest)
                .first::<String>(connection)
                .optional()
                .map_err(IdentityStoreError::persistence)?
                .ok_or(IdentityStoreError::NotFound(id))?;
            Ok(stored == candidate_digest)
        })
        .await
    }
}
