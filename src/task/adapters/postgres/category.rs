//! `PostgreSQL` category repository implementation.

use super::{
    models::{CategoryRow, NewCategoryRow, row_to_category},
    repository::TaskPgPool,
    schema::categories,
};
use crate::task::{
    domain::{Category, CategoryId, CategoryName},
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: TaskPgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CategoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CategoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CategoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CategoryRepositoryError::persistence)?
    }
}

fn find_by_name_blocking(
    connection: &mut PgConnection,
    name: &str,
) -> CategoryRepositoryResult<Option<Category>> {
    let row = categories::table
        .filter(categories::name.eq(name))
        .select(CategoryRow::as_select())
        .first::<CategoryRow>(connection)
        .optional()
        .map_err(CategoryRepositoryError::persistence)?;
    row.map(row_to_category).transpose()
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn get_or_create(
        &self,
        name: &CategoryName,
    ) -> CategoryRepositoryResult<(Category, bool)> {
        let candidate = Category::new(name.clone());
        let row = NewCategoryRow {
            id: candidate.id().into_inner(),
            name: candidate.name().as_str().to_owned(),
        };
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            // ON CONFLICT DO NOTHING makes concurrent seeding race-free; the
            // unique index on name decides the winner.
            let inserted = diesel::insert_into(categories::table)
                .values(&row)
                .on_conflict(categories::name)
                .do_nothing()
                .execute(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            if inserted > 0 {
                return Ok((candidate, true));
            }
            let existing = find_by_name_blocking(connection, &lookup)?.ok_or_else(|| {
                CategoryRepositoryError::persistence(std::io::Error::other(
                    "category vanished between conflict and lookup",
                ))
            })?;
            Ok((existing, false))
        })
        .await
    }

    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Option<Category>> {
        self.run_blocking(move |connection| {
            let row = categories::table
                .filter(categories::id.eq(id.into_inner()))
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()
                .map_err(CategoryRepositoryError::persistence)?;
            row.map(row_to_category).transpose()
        })
        .await
    }

    async fn find_by_name(
        &self,
        name: &CategoryName,
    ) -> CategoryRepositoryResult<Option<Category>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| find_by_name_blocking(connection, &lookup))
            .await
    }

    async fn list(&self) -> CategoryRepositoryResult<Vec<Category>> {
        self.run_blocking(|connection| {
            let rows = categories::table
                .order(categories::name.asc())
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_category).collect()
        })
        .await
    }

    async fn delete(&self, id: CategoryId) -> CategoryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(categories::table.filter(categories::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(CategoryRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(CategoryRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}
