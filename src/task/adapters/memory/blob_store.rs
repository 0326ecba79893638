//! In-memory blob store for upload tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::{
    domain::StoredFileUrl,
    ports::{BlobStore, UploadError, UploadResult},
};

/// Thread-safe in-memory blob store.
///
/// Stored bytes are addressable by the returned `memory://` URL.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    state: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty in-memory blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes for a previously returned URL.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Rejected`] when the URL is unknown or the
    /// store lock is poisoned.
    pub fn fetch(&self, url: &StoredFileUrl) -> UploadResult<Vec<u8>> {
        let state = self
            .state
            .read()
            .map_err(|err| UploadError::transport(std::io::Error::other(err.to_string())))?;
        state
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| UploadError::rejected(format!("unknown blob: {url}")))
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Transport`] when the store lock is poisoned.
    pub fn len(&self) -> UploadResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| UploadError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.len())
    }

    /// Returns `true` when no blobs are stored.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Transport`] when the store lock is poisoned.
    pub fn is_empty(&self) -> UploadResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, bytes: &[u8], folder: &str) -> UploadResult<StoredFileUrl> {
        let mut state = self
            .state
            .write()
            .map_err(|err| UploadError::transport(std::io::Error::other(err.to_string())))?;
        let url = format!("memory://{folder}/{}", Uuid::new_v4());
        state.insert(url.clone(), bytes.to_vec());
        Ok(StoredFileUrl::new(url))
    }
}
