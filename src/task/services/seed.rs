//! Idempotent default-category seeding.

use crate::task::{
    domain::{CategoryName, DEFAULT_CATEGORY_NAMES, TaskValidationError},
    ports::{CategoryRepository, CategoryRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while seeding default categories.
#[derive(Debug, Error)]
pub enum CategorySeedError {
    /// A default name failed scalar validation.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// Category persistence failed.
    #[error(transparent)]
    Repository(#[from] CategoryRepositoryError),
}

/// Ensures the default category set exists.
///
/// Safe to invoke repeatedly and concurrently: the repository's atomic
/// `get_or_create` guarantees each name exists exactly once.
#[derive(Clone)]
pub struct CategorySeeder<K>
where
    K: CategoryRepository,
{
    categories: Arc<K>,
}

impl<K> CategorySeeder<K>
where
    K: CategoryRepository,
{
    /// Creates a new seeder.
    #[must_use]
    pub const fn new(categories: Arc<K>) -> Self {
        Self { categories }
    }

    /// Ensures every default category exists and returns how many were
    /// newly created.
    ///
    /// # Errors
    ///
    /// Returns [`CategorySeedError`] when the repository rejects an
    /// operation.
    pub async fn ensure_defaults(&self) -> Result<usize, CategorySeedError> {
        let mut created_count = 0;
        for name in DEFAULT_CATEGORY_NAMES {
            let category_name = CategoryName::new(name)?;
            let (_, created) = self.categories.get_or_create(&category_name).await?;
            if created {
                created_count += 1;
            }
        }
        if created_count > 0 {
            tracing::info!(created_count, "created default categories");
        }
        Ok(created_count)
    }

    /// Seeding entry point for startup paths: failures are logged, never
    /// fatal.
    pub async fn ensure_defaults_or_log(&self) -> usize {
        match self.ensure_defaults().await {
            Ok(created_count) => created_count,
            Err(err) => {
                tracing::warn!(error = %err, "default category seeding failed");
                0
            }
        }
    }
}
