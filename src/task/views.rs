//! Read-side representations of tasks and attachments.
//!
//! Two shapes exist on purpose: the flattened list view carries the
//! category name instead of its id and omits assignment/attachment detail;
//! the detail view expands assigned users and attachment URLs.

use crate::identity::views::UserView;
use crate::task::domain::{Attachment, AttachmentId, Task, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Attachment shape exposed on task detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentView {
    /// Attachment identifier.
    pub id: AttachmentId,
    /// Blob store URL.
    pub url: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl AttachmentView {
    /// Builds the view from an attachment entity.
    #[must_use]
    pub fn from_attachment(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id(),
            url: attachment.url().as_str().to_owned(),
            uploaded_at: attachment.uploaded_at(),
        }
    }
}

/// Flattened task shape for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority.
    pub priority: TaskPriority,
    /// Category name, when a category is set and still exists.
    pub category: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskListView {
    /// Builds the view from a task and its resolved category name.
    #[must_use]
    pub fn from_parts(task: &Task, category: Option<String>) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
            priority: task.priority(),
            category,
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Expanded task shape for detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetailView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority.
    pub priority: TaskPriority,
    /// Category name, when a category is set and still exists.
    pub category: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Full assigned-user objects.
    pub assigned_users: Vec<UserView>,
    /// Attachments with their stored URLs.
    pub upload_files: Vec<AttachmentView>,
    /// Whether the task is past due and not done.
    pub is_overdue: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskDetailView {
    /// Builds the view from a task and its resolved relations.
    #[must_use]
    pub fn from_parts(
        task: &Task,
        category: Option<String>,
        assigned_users: Vec<UserView>,
        upload_files: Vec<AttachmentView>,
        is_overdue: bool,
    ) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
            priority: task.priority(),
            category,
            status: task.status(),
            assigned_users,
            upload_files,
            is_overdue,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
