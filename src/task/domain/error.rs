//! Error types for task domain validation and parsing.

use super::CategoryId;
use crate::identity::domain::UserId;
use thiserror::Error;

/// Write-time validation failures for task and category values.
///
/// Violations are field-scoped except [`TaskValidationError::DueDateInPast`],
/// which applies to the whole object. Services collect all applicable
/// violations before failing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The due date being written lies before the current date.
    #[error("Due date cannot be in the past.")]
    DueDateInPast,

    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the storage limit.
    #[error("title must be at most {0} characters")]
    TitleTooLong(usize),

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// The category name exceeds the storage limit.
    #[error("category name must be at most {0} characters")]
    CategoryNameTooLong(usize),

    /// The referenced category does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// A referenced assignee does not exist.
    #[error("unknown assigned user: {0}")]
    UnknownAssignee(UserId),

    /// Multiple validation errors occurred.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[TaskValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TaskValidationError {
    /// Combines multiple validation errors into a single error.
    ///
    /// If only one error is provided, returns it directly rather than
    /// wrapping.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if called with an empty vector, as this
    /// indicates a logic error in the caller.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Self {
        match errors.len() {
            0 => {
                debug_assert!(false, "multiple() called with empty errors vector");
                Self::EmptyTitle
            }
            1 => errors.into_iter().next().unwrap_or(Self::EmptyTitle),
            _ => Self::Multiple(errors),
        }
    }

    /// Returns `Ok(())` when no violations were collected, otherwise the
    /// combined error.
    ///
    /// # Errors
    ///
    /// Returns the single violation, or a
    /// [`TaskValidationError::Multiple`] bundle when more than one was
    /// collected.
    pub fn collect(errors: Vec<Self>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::multiple(errors))
        }
    }

    /// Returns the field this violation is scoped to.
    ///
    /// `None` marks an object-scoped violation (and the `Multiple` bundle).
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::DueDateInPast | Self::Multiple(_) => None,
            Self::EmptyTitle | Self::TitleTooLong(_) => Some("title"),
            Self::EmptyCategoryName | Self::CategoryNameTooLong(_) => Some("name"),
            Self::UnknownCategory(_) => Some("category"),
            Self::UnknownAssignee(_) => Some("assigned_user_ids"),
        }
    }

    /// Returns `true` if this error represents multiple validation failures.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns the individual errors if this is a `Multiple` variant.
    #[must_use]
    pub fn errors(&self) -> Option<&[Self]> {
        match self {
            Self::Multiple(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns `true` when this error (or any bundled one) matches the
    /// predicate.
    #[must_use]
    pub fn any(&self, predicate: impl Fn(&Self) -> bool + Copy) -> bool {
        match self {
            Self::Multiple(errors) => errors.iter().any(|error| error.any(predicate)),
            other => predicate(other),
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
