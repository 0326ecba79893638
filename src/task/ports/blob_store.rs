//! Blob store port: the external content-addressable file service.

use crate::task::domain::StoredFileUrl;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// External file storage contract.
///
/// Uploads are synchronous from the caller's perspective: the mutating
/// request blocks until the blob is stored or the upload has failed.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the given bytes under the folder and returns a retrievable
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] on transport or storage failure.
    async fn upload(&self, bytes: &[u8], folder: &str) -> UploadResult<StoredFileUrl>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The store refused the upload.
    #[error("blob store rejected the upload: {0}")]
    Rejected(String),

    /// The store could not be reached or failed mid-transfer.
    #[error("blob store transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl UploadError {
    /// Creates a rejection error with the store's reason.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
