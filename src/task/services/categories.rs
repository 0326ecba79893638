//! Category listing and administration.

use crate::authz::{AccessError, Requester};
use crate::task::{
    domain::{Category, CategoryId, CategoryName, TaskValidationError},
    ports::{
        CategoryRepository, CategoryRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for category operations.
#[derive(Debug, Error)]
pub enum CategoryServiceError {
    /// The requester may not perform the operation.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The category name failed validation.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The category does not exist.
    #[error("category not found: {0}")]
    NotFound(CategoryId),
    /// Category persistence failed.
    #[error(transparent)]
    Repository(#[from] CategoryRepositoryError),
    /// Task reference cleanup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for category service operations.
pub type CategoryServiceResult<T> = Result<T, CategoryServiceError>;

/// Category orchestration service.
///
/// Reads are public; mutations require an authenticated requester.
#[derive(Clone)]
pub struct CategoryService<K, R>
where
    K: CategoryRepository,
    R: TaskRepository,
{
    categories: Arc<K>,
    tasks: Arc<R>,
}

impl<K, R> CategoryService<K, R>
where
    K: CategoryRepository,
    R: TaskRepository,
{
    /// Creates a new category service.
    #[must_use]
    pub const fn new(categories: Arc<K>, tasks: Arc<R>) -> Self {
        Self { categories, tasks }
    }

    /// Returns all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the lookup fails.
    pub async fn list(&self) -> CategoryServiceResult<Vec<Category>> {
        Ok(self.categories.list().await?)
    }

    /// Fetches a single category.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryServiceError::NotFound`] when the category does
    /// not exist.
    pub async fn get(&self, id: CategoryId) -> CategoryServiceResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(CategoryServiceError::NotFound(id))
    }

    /// Creates a category, returning the existing one when the name is
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters or
    /// [`CategoryServiceError::Validation`] for a malformed name.
    pub async fn create(
        &self,
        requester: &Requester,
        name: &str,
    ) -> CategoryServiceResult<Category> {
        requester.require_authenticated()?;
        let category_name = CategoryName::new(name)?;
        let (category, _created) = self.categories.get_or_create(&category_name).await?;
        Ok(category)
    }

    /// Removes a category, clearing the reference on every task that
    /// pointed at it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] for anonymous requesters or
    /// [`CategoryServiceError::NotFound`] when the category does not exist.
    pub async fn delete(&self, requester: &Requester, id: CategoryId) -> CategoryServiceResult<()> {
        requester.require_authenticated()?;
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(CategoryServiceError::NotFound(id));
        }
        self.tasks.detach_category(id).await?;
        self.categories.delete(id).await?;
        Ok(())
    }
}
