//! In-memory attachment repository for lifecycle tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Attachment, TaskId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};

/// Thread-safe in-memory attachment repository.
///
/// Records are kept in insertion order, which doubles as upload order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    state: Arc<RwLock<Vec<Attachment>>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> AttachmentRepositoryError {
    AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.iter().any(|stored| stored.id() == attachment.id()) {
            return Err(AttachmentRepositoryError::DuplicateAttachment(
                attachment.id(),
            ));
        }
        state.push(attachment.clone());
        Ok(())
    }

    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .iter()
            .filter(|stored| stored.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn delete_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.retain(|stored| stored.task_id() != task_id);
        Ok(())
    }
}
