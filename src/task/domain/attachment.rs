//! Attachment entity owned by a task.

use super::{AttachmentId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque URL returned by the blob store for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredFileUrl(String);

impl StoredFileUrl {
    /// Wraps a blob-store URL.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoredFileUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StoredFileUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File attached to a task.
///
/// Owned by exactly one task; removal of the task removes its attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    task_id: TaskId,
    url: StoredFileUrl,
    uploaded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted attachment identifier.
    pub id: AttachmentId,
    /// Owning task identifier.
    pub task_id: TaskId,
    /// Stored file URL.
    pub url: StoredFileUrl,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// Creates an attachment record for a freshly uploaded file.
    #[must_use]
    pub fn new(task_id: TaskId, url: StoredFileUrl, clock: &impl Clock) -> Self {
        Self {
            id: AttachmentId::new(),
            task_id,
            url,
            uploaded_at: clock.utc(),
        }
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            url: data.url,
            uploaded_at: data.uploaded_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the stored file URL.
    #[must_use]
    pub const fn url(&self) -> &StoredFileUrl {
        &self.url
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}
