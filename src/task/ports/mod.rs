//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! persistence repositories and the external blob store.

pub mod blob_store;
pub mod repository;

pub use blob_store::{BlobStore, UploadError, UploadResult};
pub use repository::{
    AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult,
    CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};
