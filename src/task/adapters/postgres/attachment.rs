//! `PostgreSQL` attachment repository implementation.

use super::{
    models::{AttachmentRow, NewAttachmentRow, row_to_attachment},
    repository::TaskPgPool,
    schema::attachments,
};
use crate::task::{
    domain::{Attachment, TaskId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed attachment repository.
#[derive(Debug, Clone)]
pub struct PostgresAttachmentRepository {
    pool: TaskPgPool,
}

impl PostgresAttachmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AttachmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AttachmentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AttachmentRepositoryError::persistence)?
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let attachment_id = attachment.id();
        let row = NewAttachmentRow {
            id: attachment_id.into_inner(),
            task_id: attachment.task_id().into_inner(),
            url: attachment.url().as_str().to_owned(),
            uploaded_at: attachment.uploaded_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(attachments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AttachmentRepositoryError::DuplicateAttachment(attachment_id)
                    }
                    _ => AttachmentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        self.run_blocking(move |connection| {
            let rows = attachments::table
                .filter(attachments::task_id.eq(task_id.into_inner()))
                .order(attachments::uploaded_at.asc())
                .select(AttachmentRow::as_select())
                .load::<AttachmentRow>(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_attachment).collect())
        })
        .await
    }

    async fn delete_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(attachments::table.filter(attachments::task_id.eq(task_id.into_inner())))
                .execute(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}
