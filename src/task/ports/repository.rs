//! Repository ports for task, category, and attachment persistence.

use crate::identity::domain::UserId;
use crate::task::domain::{
    Attachment, AttachmentId, Category, CategoryId, CategoryName, Task, TaskId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// A stored task includes its assigned-user set; `store` and `update`
/// persist the whole aggregate.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task with its assignment set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task, reconciling the assignment
    /// set to exactly the aggregate's members.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task and its assignment rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks in listing order (due date descending with
    /// undated tasks last, priority high to low, then status).
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Clears the category reference on every task pointing at the given
    /// category.
    async fn detach_category(&self, category_id: CategoryId) -> TaskRepositoryResult<()>;

    /// Clears the creator reference on every task created by the given
    /// user.
    async fn clear_creator(&self, user_id: UserId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for category repository operations.
pub type CategoryRepositoryResult<T> = Result<T, CategoryRepositoryError>;

/// Category persistence contract.
///
/// The name is unique; `get_or_create` must be atomic with respect to that
/// constraint so repeated initialization cannot produce duplicates.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns the category with the given name, creating it when absent.
    ///
    /// The boolean is `true` when a new row was created.
    async fn get_or_create(&self, name: &CategoryName)
    -> CategoryRepositoryResult<(Category, bool)>;

    /// Finds a category by identifier.
    ///
    /// Returns `None` when the category does not exist.
    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Option<Category>>;

    /// Finds a category by unique name.
    ///
    /// Returns `None` when no category holds the name.
    async fn find_by_name(&self, name: &CategoryName) -> CategoryRepositoryResult<Option<Category>>;

    /// Returns all categories ordered by name.
    async fn list(&self) -> CategoryRepositoryResult<Vec<Category>>;

    /// Removes a category.
    ///
    /// Callers detach the category from tasks first; the repository only
    /// removes the row.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when the category does
    /// not exist.
    async fn delete(&self, id: CategoryId) -> CategoryRepositoryResult<()>;
}

/// Errors returned by category repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryRepositoryError {
    /// The category was not found.
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for attachment repository operations.
pub type AttachmentRepositoryResult<T> = Result<T, AttachmentRepositoryError>;

/// Attachment persistence contract.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores a new attachment record.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::DuplicateAttachment`] when the
    /// attachment ID already exists.
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()>;

    /// Returns a task's attachments in upload order.
    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>>;

    /// Removes every attachment owned by the given task.
    async fn delete_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<()>;
}

/// Errors returned by attachment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentRepositoryError {
    /// An attachment with the same identifier already exists.
    #[error("duplicate attachment identifier: {0}")]
    DuplicateAttachment(AttachmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
