//! `PostgreSQL` task repository implementation.

use super::{
    models::{TaskRow, row_to_task, task_to_assignment_rows, task_to_row_values},
    schema::{task_assignments, tasks},
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{CategoryId, Task, TaskId, listing_order},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        // Unique-constraint violations are mapped to semantic errors at the
        // call sites that know the conflicting identifier; everything that
        // reaches this blanket conversion is a plain persistence failure.
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

fn load_assignments(
    connection: &mut PgConnection,
    task_id: TaskId,
) -> TaskRepositoryResult<Vec<uuid::Uuid>> {
    task_assignments::table
        .filter(task_assignments::task_id.eq(task_id.into_inner()))
        .select(task_assignments::user_id)
        .load::<uuid::Uuid>(connection)
        .map_err(TaskRepositoryError::persistence)
}

fn replace_assignments(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    diesel::delete(
        task_assignments::table.filter(task_assignments::task_id.eq(task.id().into_inner())),
    )
    .execute(connection)
    .map_err(TaskRepositoryError::persistence)?;
    let rows = task_to_assignment_rows(task);
    if !rows.is_empty() {
        diesel::insert_into(task_assignments::table)
            .values(&rows)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row_values(task);
        let owned_task = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|inner| {
                diesel::insert_into(tasks::table)
                    .values(&row)
                    .execute(inner)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                replace_assignments(inner, &owned_task)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row_values(task);
        let owned_task = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|inner| {
                let updated = diesel::update(
                    tasks::table.filter(tasks::id.eq(task_id.into_inner())),
                )
                .set(&row)
                .execute(inner)
                .map_err(TaskRepositoryError::persistence)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }
                replace_assignments(inner, &owned_task)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction(|inner| {
                diesel::delete(
                    task_assignments::table.filter(task_assignments::task_id.eq(id.into_inner())),
                )
                .execute(inner)
                .map_err(TaskRepositoryError::persistence)?;
                let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .execute(inner)
                    .map_err(TaskRepositoryError::persistence)?;
                if deleted == 0 {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|found| {
                let assigned = load_assignments(connection, id)?;
                row_to_task(found, assigned)
            })
            .transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut result = Vec::with_capacity(rows.len());
            for row in rows {
                let task_id = TaskId::from_uuid(row.id);
                let assigned = load_assignments(connection, task_id)?;
                result.push(row_to_task(row, assigned)?);
            }
            result.sort_by(listing_order);
            Ok(result)
        })
        .await
    }

    async fn detach_category(&self, category_id: CategoryId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::update(
                tasks::table.filter(tasks::category_id.eq(Some(category_id.into_inner()))),
            )
            .set(tasks::category_id.eq(None::<uuid::Uuid>))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn clear_creator(&self, user_id: UserId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::update(tasks::table.filter(tasks::created_by.eq(Some(user_id.into_inner()))))
                .set(tasks::created_by.eq(None::<uuid::Uuid>))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}
