//! Task aggregate root and its lifecycle value types.

use super::{
    CategoryId, ParseTaskPriorityError, ParseTaskStatusError, TaskId, TaskValidationError,
};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
///
/// Variant order carries the semantic ranking used for listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Validated task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum stored length in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] or
    /// [`TaskValidationError::TitleTooLong`] when the value is malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(TaskValidationError::TitleTooLong(Self::MAX_LENGTH));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Update intent for a nullable field, distinguishing "leave untouched"
/// from "clear" and "set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the current value untouched.
    #[default]
    Unchanged,
    /// Clear the value.
    Clear,
    /// Replace the value.
    Set(T),
}

/// Partial update to a task's own fields.
///
/// Omitted fields are left untouched; the assigned-user set is reconciled
/// separately because its "omitted vs empty" distinction belongs to the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Due date update intent.
    pub due_date: FieldUpdate<NaiveDate>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Category update intent.
    pub category: FieldUpdate<CategoryId>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Free-text description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority.
    pub priority: TaskPriority,
    /// Workflow status.
    pub status: TaskStatus,
    /// Optional category reference.
    pub category_id: Option<CategoryId>,
    /// Creating user, if known.
    pub created_by: Option<UserId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    due_date: Option<NaiveDate>,
    priority: TaskPriority,
    status: TaskStatus,
    category_id: Option<CategoryId>,
    assigned_users: BTreeSet<UserId>,
    created_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted category reference, if any.
    pub category_id: Option<CategoryId>,
    /// Persisted assigned-user set.
    pub assigned_users: BTreeSet<UserId>,
    /// Persisted creator, if the account still exists.
    pub created_by: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Checks the write-time due-date invariant.
///
/// Applies only when a due date is being written; stored values are never
/// re-validated retroactively.
///
/// # Errors
///
/// Returns [`TaskValidationError::DueDateInPast`] when the date lies before
/// the clock's current UTC date.
pub fn validate_due_date(
    due_date: Option<NaiveDate>,
    clock: &impl Clock,
) -> Result<(), TaskValidationError> {
    if due_date.is_some_and(|date| date < clock.utc().date_naive()) {
        return Err(TaskValidationError::DueDateInPast);
    }
    Ok(())
}

/// Listing order: due date descending with undated tasks last, then
/// priority high to low, then status.
#[must_use]
pub fn listing_order(left: &Task, right: &Task) -> Ordering {
    let by_due_date = match (left.due_date(), right.due_date()) {
        (Some(lhs), Some(rhs)) => rhs.cmp(&lhs),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due_date
        .then_with(|| right.priority().cmp(&left.priority()))
        .then_with(|| left.status().as_str().cmp(right.status().as_str()))
}

impl Task {
    /// Creates a new task, enforcing the write-time due-date invariant.
    ///
    /// The assigned-user set starts empty; reconciliation happens through
    /// [`Task::replace_assignees`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DueDateInPast`] when the due date lies
    /// before the clock's current date.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskValidationError> {
        validate_due_date(data.due_date, clock)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            category_id: data.category_id,
            assigned_users: BTreeSet::new(),
            created_by: data.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage without re-validation.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            category_id: data.category_id,
            assigned_users: data.assigned_users,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the category reference, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Returns the assigned-user set.
    #[must_use]
    pub const fn assigned_users(&self) -> &BTreeSet<UserId> {
        &self.assigned_users
    }

    /// Returns the creator, if the account still exists.
    #[must_use]
    pub const fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the user is a member of the assigned set.
    #[must_use]
    pub fn is_assigned(&self, user_id: UserId) -> bool {
        self.assigned_users.contains(&user_id)
    }

    /// Returns `true` when the task is past due and not done.
    ///
    /// A task with no due date, a due date of today or later, or a `done`
    /// status is never overdue.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.due_date.is_some_and(|date| {
            self.status != TaskStatus::Done && clock.utc().date_naive() > date
        })
    }

    /// Applies a partial update, enforcing the due-date invariant for a
    /// newly written date only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DueDateInPast`] when the update sets
    /// a due date before the clock's current date.
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskValidationError> {
        if let FieldUpdate::Set(date) = changes.due_date {
            validate_due_date(Some(date), clock)?;
        }

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        match changes.due_date {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => self.due_date = None,
            FieldUpdate::Set(date) => self.due_date = Some(date),
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        match changes.category {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => self.category_id = None,
            FieldUpdate::Set(category_id) => self.category_id = Some(category_id),
        }
        self.touch(clock);
        Ok(())
    }

    /// Replaces the assigned-user set with exactly the given members.
    pub fn replace_assignees(&mut self, user_ids: impl IntoIterator<Item = UserId>) {
        self.assigned_users = user_ids.into_iter().collect();
    }

    /// Clears the category reference.
    ///
    /// Invoked when the referenced category is deleted.
    pub const fn clear_category(&mut self) {
        self.category_id = None;
    }

    /// Clears the creator reference.
    ///
    /// Invoked when the creating account is deleted.
    pub const fn clear_creator(&mut self) {
        self.created_by = None;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
