//! Domain model for task tracking.
//!
//! Models categorised, assignable tasks with due-date invariants and
//! task-owned file attachments while keeping all infrastructure concerns
//! outside of the domain boundary.

mod attachment;
mod category;
mod error;
mod ids;
mod task;

pub use attachment::{Attachment, PersistedAttachmentData, StoredFileUrl};
pub use category::{Category, CategoryName, DEFAULT_CATEGORY_NAMES};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskValidationError};
pub use ids::{AttachmentId, CategoryId, TaskId};
pub use task::{
    FieldUpdate, NewTaskData, PersistedTaskData, Task, TaskChanges, TaskPriority, TaskStatus,
    TaskTitle, listing_order, validate_due_date,
};
