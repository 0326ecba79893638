//! Diesel row models and conversions for task persistence.

use super::schema::{attachments, categories, task_assignments, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use std::collections::BTreeSet;

use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        Attachment, AttachmentId, Category, CategoryId, CategoryName, PersistedAttachmentData,
        PersistedTaskData, StoredFileUrl, Task, TaskId, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{CategoryRepositoryError, TaskRepositoryError},
};

/// Query result row for categories.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Category name.
    pub name: String,
}

/// Insert model for categories.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Category name.
    pub name: String,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority storage string.
    pub priority: String,
    /// Status storage string.
    pub status: String,
    /// Optional category reference.
    pub category_id: Option<uuid::Uuid>,
    /// Optional creator reference.
    pub created_by: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskRowValues {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority storage string.
    pub priority: String,
    /// Status storage string.
    pub status: String,
    /// Optional category reference.
    pub category_id: Option<uuid::Uuid>,
    /// Optional creator reference.
    pub created_by: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for assignment rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_assignments)]
pub struct NewAssignmentRow {
    /// Assigned task.
    pub task_id: uuid::Uuid,
    /// Assigned user.
    pub user_id: uuid::Uuid,
}

/// Query result row for attachments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Blob store URL.
    pub url: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Insert model for attachments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attachments)]
pub struct NewAttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Blob store URL.
    pub url: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Converts a stored category row back into the domain entity.
///
/// # Errors
///
/// Returns [`CategoryRepositoryError::Persistence`] when the stored name no
/// longer satisfies the domain's scalar invariants.
pub fn row_to_category(row: CategoryRow) -> Result<Category, CategoryRepositoryError> {
    let name = CategoryName::new(row.name).map_err(CategoryRepositoryError::persistence)?;
    Ok(Category::from_parts(CategoryId::from_uuid(row.id), name))
}

/// Builds task row values from the aggregate.
#[must_use]
pub fn task_to_row_values(task: &Task) -> TaskRowValues {
    TaskRowValues {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        due_date: task.due_date(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        category_id: task.category_id().map(CategoryId::into_inner),
        created_by: task.created_by().map(UserId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

/// Builds assignment rows for the aggregate's assigned-user set.
#[must_use]
pub fn task_to_assignment_rows(task: &Task) -> Vec<NewAssignmentRow> {
    task.assigned_users()
        .iter()
        .map(|user_id| NewAssignmentRow {
            task_id: task.id().into_inner(),
            user_id: user_id.into_inner(),
        })
        .collect()
}

/// Converts a stored task row plus its assignment set back into the
/// aggregate.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when stored values no
/// longer parse into domain scalars.
pub fn row_to_task(row: TaskRow, assigned: Vec<uuid::Uuid>) -> Result<Task, TaskRepositoryError> {
    let TaskRow {
        id,
        title,
        description,
        due_date,
        priority,
        status,
        category_id,
        created_by,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let assigned_users: BTreeSet<UserId> = assigned.into_iter().map(UserId::from_uuid).collect();

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        due_date,
        priority,
        status,
        category_id: category_id.map(CategoryId::from_uuid),
        assigned_users,
        created_by: created_by.map(UserId::from_uuid),
        created_at,
        updated_at,
    }))
}

/// Converts a stored attachment row back into the domain entity.
#[must_use]
pub fn row_to_attachment(row: AttachmentRow) -> Attachment {
    Attachment::from_persisted(PersistedAttachmentData {
        id: AttachmentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        url: StoredFileUrl::new(row.url),
        uploaded_at: row.uploaded_at,
    })
}
