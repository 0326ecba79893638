//! Task lifecycle orchestration: validated creation, partial updates,
//! assignment reconciliation, and attachment uploads.

use crate::authz::{AccessError, AssigneeOrReadOnly, Operation, Requester, enforce};
use crate::identity::{
    domain::UserId,
    ports::{IdentityStore, IdentityStoreError},
    views::UserView,
};
use crate::task::{
    domain::{
        Attachment, CategoryId, FieldUpdate, NewTaskData, Task, TaskChanges, TaskId, TaskPriority,
        TaskStatus, TaskTitle, TaskValidationError, validate_due_date,
    },
    ports::{
        AttachmentRepository, AttachmentRepositoryError, BlobStore, CategoryRepository,
        CategoryRepositoryError, TaskRepository, TaskRepositoryError, UploadError,
    },
    views::{AttachmentView, TaskDetailView, TaskListView},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Blob store folder receiving task uploads.
const ATTACHMENT_FOLDER: &str = "task_files";

/// A file queued for upload alongside a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl NewUpload {
    /// Creates an upload payload.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Returns the client-supplied file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the file content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    due_date: Option<NaiveDate>,
    priority: TaskPriority,
    status: TaskStatus,
    category: Option<CategoryId>,
    assigned_user_ids: Vec<UserId>,
    uploads: Vec<NewUpload>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields and defaulted metadata.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            category: None,
            assigned_user_ids: Vec::new(),
            uploads: Vec::new(),
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the category reference.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the assigned-user set.
    #[must_use]
    pub fn with_assignees(mut self, user_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_user_ids = user_ids.into_iter().collect();
        self
    }

    /// Queues a file for upload.
    #[must_use]
    pub fn with_upload(mut self, upload: NewUpload) -> Self {
        self.uploads.push(upload);
        self
    }
}

/// Request payload for partially updating a task.
///
/// Omitted fields preserve current values. The assigned-user list
/// distinguishes "omitted" (`None`, leave untouched) from "provided as
/// empty" (`Some(vec![])`, clear the set).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    due_date: FieldUpdate<NaiveDate>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    category: FieldUpdate<CategoryId>,
    assigned_user_ids: Option<Vec<UserId>>,
    uploads: Vec<NewUpload>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = FieldUpdate::Set(due_date);
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clearing_due_date(mut self) -> Self {
        self.due_date = FieldUpdate::Clear;
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the category reference.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = FieldUpdate::Set(category);
        self
    }

    /// Clears the category reference.
    #[must_use]
    pub const fn clearing_category(mut self) -> Self {
        self.category = FieldUpdate::Clear;
        self
    }

    /// Reconciles the assigned-user set to exactly the given members.
    ///
    /// Passing an empty iterator clears the set; not calling this leaves
    /// the current assignment untouched.
    #[must_use]
    pub fn with_assignees(mut self, user_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_user_ids = Some(user_ids.into_iter().collect());
        self
    }

    /// Queues a file for upload; existing attachments are never removed.
    #[must_use]
    pub fn with_upload(mut self, upload: NewUpload) -> Self {
        self.uploads.push(upload);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// One or more fields failed validation.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// A queued file failed to upload.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Category lookup failed.
    #[error(transparent)]
    Categories(#[from] CategoryRepositoryError),
    /// Attachment persistence failed.
    #[error(transparent)]
    Attachments(#[from] AttachmentRepositoryError),
    /// Identity store lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityStoreError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// All operations require an authenticated requester; mutations are
/// additionally gated by the assignee-or-read-only policy.
#[derive(Clone)]
pub struct TaskLifecycleService<R, K, A, B, S, C>
where
    R: TaskRepository,
    K: CategoryRepository,
    A: AttachmentRepository,
    B: BlobStore,
    S: IdentityStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    categories: Arc<K>,
    attachments: Arc<A>,
    blobs: Arc<B>,
    identities: Arc<S>,
    clock: Arc<C>,
}

impl<R, K, A, B, S, C> TaskLifecycleService<R, K, A, B, S, C>
where
    R: TaskRepository,
    K: CategoryRepository,
    A: AttachmentRepository,
    B: BlobStore,
    S: IdentityStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        categories: Arc<K>,
        attachments: Arc<A>,
        blobs: Arc<B>,
        identities: Arc<S>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            categories,
            attachments,
            blobs,
            identities,
            clock,
        }
    }

    /// Creates a task, reconciles its assignment set, and uploads queued
    /// files in input order.
    ///
    /// A failed upload aborts the remaining queue and surfaces to the
    /// caller; the already-persisted task and earlier attachments are left
    /// in place (the blob store sits outside the storage transaction).
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] carrying every collected
    /// violation, [`TaskLifecycleError::Upload`] on blob store failure, or
    /// a persistence error.
    pub async fn create(
        &self,
        requester: &Requester,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let actor = requester.require_authenticated()?;

        let mut violations = Vec::new();
        let parsed_title = match TaskTitle::new(&request.title) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                violations.push(err);
                None
            }
        };
        if let Some(category_id) = request.category
            && self.categories.find_by_id(category_id).await?.is_none()
        {
            violations.push(TaskValidationError::UnknownCategory(category_id));
        }
        let assignees = self
            .resolve_assignees(&request.assigned_user_ids, &mut violations)
            .await?;
        if let Err(err) = validate_due_date(request.due_date, &*self.clock) {
            violations.push(err);
        }

        let Some(title) = parsed_title else {
            return Err(TaskValidationError::multiple(violations).into());
        };
        TaskValidationError::collect(violations)?;

        let mut task = Task::new(
            NewTaskData {
                title,
                description: request.description,
                due_date: request.due_date,
                priority: request.priority,
                status: request.status,
                category_id: request.category,
                created_by: Some(actor),
            },
            &*self.clock,
        )?;
        task.replace_assignees(assignees);
        self.tasks.store(&task).await?;

        self.store_uploads(task.id(), &request.uploads).await?;
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// Only assigned users may mutate; the assignment set is reconciled
    /// only when explicitly provided, and new attachments are appended
    /// without touching existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`AccessError::Forbidden`] for a non-assigned requester, collected
    /// validation errors, or an upload/persistence error.
    pub async fn update(
        &self,
        requester: &Requester,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        requester.require_authenticated()?;
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        enforce(&AssigneeOrReadOnly, requester, Operation::PartialUpdate, &task)?;

        let mut violations = Vec::new();
        let parsed_title = match request.title {
            Some(raw) => match TaskTitle::new(raw) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    violations.push(err);
                    None
                }
            },
            None => None,
        };
        if let FieldUpdate::Set(category_id) = request.category
            && self.categories.find_by_id(category_id).await?.is_none()
        {
            violations.push(TaskValidationError::UnknownCategory(category_id));
        }
        let assignees = match request.assigned_user_ids {
            Some(ref user_ids) => Some(self.resolve_assignees(user_ids, &mut violations).await?),
            None => None,
        };
        if let FieldUpdate::Set(date) = request.due_date
            && let Err(err) = validate_due_date(Some(date), &*self.clock)
        {
            violations.push(err);
        }
        TaskValidationError::collect(violations)?;

        task.apply(
            TaskChanges {
                title: parsed_title,
                description: request.description,
                due_date: request.due_date,
                priority: request.priority,
                status: request.status,
                category: request.category,
            },
            &*self.clock,
        )?;
        if let Some(user_ids) = assignees {
            task.replace_assignees(user_ids);
        }
        self.tasks.update(&task).await?;

        self.store_uploads(task.id(), &request.uploads).await?;
        Ok(task)
    }

    /// Removes a task together with its attachments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// [`AccessError::Forbidden`] for a non-assigned requester.
    pub async fn delete(&self, requester: &Requester, task_id: TaskId) -> TaskLifecycleResult<()> {
        requester.require_authenticated()?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        enforce(&AssigneeOrReadOnly, requester, Operation::Delete, &task)?;

        self.attachments.delete_by_task(task_id).await?;
        self.tasks.delete(task_id).await?;
        Ok(())
    }

    /// Fetches a task.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters or
    /// [`TaskLifecycleError::NotFound`] for an unknown task.
    pub async fn get(&self, requester: &Requester, task_id: TaskId) -> TaskLifecycleResult<Task> {
        requester.require_authenticated()?;
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Returns all tasks in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters.
    pub async fn list(&self, requester: &Requester) -> TaskLifecycleResult<Vec<Task>> {
        requester.require_authenticated()?;
        Ok(self.tasks.list().await?)
    }

    /// Returns all tasks as flattened list views.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters or
    /// a persistence error.
    pub async fn list_views(&self, requester: &Requester) -> TaskLifecycleResult<Vec<TaskListView>> {
        let tasks = self.list(requester).await?;
        let mut views = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let category_name = self.category_name(task).await?;
            views.push(TaskListView::from_parts(task, category_name));
        }
        Ok(views)
    }

    /// Returns a task's detail view with assigned users and attachments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or a
    /// persistence error.
    pub async fn detail_view(
        &self,
        requester: &Requester,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TaskDetailView> {
        let task = self.get(requester, task_id).await?;
        let category_name = self.category_name(&task).await?;

        let mut assigned_users = Vec::with_capacity(task.assigned_users().len());
        for user_id in task.assigned_users() {
            if let Some(user) = self.identities.find_by_id(*user_id).await? {
                assigned_users.push(UserView::from_user(&user));
            }
        }

        let attachments = self.attachments.list_by_task(task_id).await?;
        let upload_files = attachments.iter().map(AttachmentView::from_attachment).collect();

        let is_overdue = task.is_overdue(&*self.clock);
        Ok(TaskDetailView::from_parts(
            &task,
            category_name,
            assigned_users,
            upload_files,
            is_overdue,
        ))
    }

    async fn resolve_assignees(
        &self,
        user_ids: &[UserId],
        violations: &mut Vec<TaskValidationError>,
    ) -> TaskLifecycleResult<BTreeSet<UserId>> {
        let mut assignees = BTreeSet::new();
        for user_id in user_ids {
            if self.identities.find_by_id(*user_id).await?.is_none() {
                violations.push(TaskValidationError::UnknownAssignee(*user_id));
            } else {
                assignees.insert(*user_id);
            }
        }
        Ok(assignees)
    }

    async fn category_name(&self, task: &Task) -> TaskLifecycleResult<Option<String>> {
        let Some(category_id) = task.category_id() else {
            return Ok(None);
        };
        let category = self.categories.find_by_id(category_id).await?;
        Ok(category.map(|found| found.name().as_str().to_owned()))
    }

    async fn store_uploads(
        &self,
        task_id: TaskId,
        uploads: &[NewUpload],
    ) -> TaskLifecycleResult<Vec<Attachment>> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let url = match self.blobs.upload(upload.bytes(), ATTACHMENT_FOLDER).await {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(%task_id, file_name = upload.file_name(), error = %err,
                        "attachment upload failed");
                    return Err(err.into());
                }
            };
            let attachment = Attachment::new(task_id, url, &*self.clock);
            self.attachments.store(&attachment).await?;
            stored.push(attachment);
        }
        Ok(stored)
    }
}
