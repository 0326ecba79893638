//! In-memory category repository for seeding and lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Category, CategoryId, CategoryName},
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};

/// Thread-safe in-memory category repository.
///
/// `get_or_create` holds the write lock for the whole check-and-insert, so
/// concurrent seeding cannot produce duplicate names.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<InMemoryCategoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryCategoryState {
    categories: HashMap<CategoryId, Category>,
    name_index: HashMap<String, CategoryId>,
}

impl InMemoryCategoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CategoryRepositoryError {
    CategoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn get_or_create(
        &self,
        name: &CategoryName,
    ) -> CategoryRepositoryResult<(Category, bool)> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(existing) = state
            .name_index
            .get(name.as_str())
            .and_then(|id| state.categories.get(id))
        {
            return Ok((existing.clone(), false));
        }

        let category = Category::new(name.clone());
        state
            .name_index
            .insert(name.as_str().to_owned(), category.id());
        state.categories.insert(category.id(), category.clone());
        Ok((category, true))
    }

    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Option<Category>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.categories.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &CategoryName,
    ) -> CategoryRepositoryResult<Option<Category>> {
        let state = self.state.read().map_err(lock_error)?;
        let category = state
            .name_index
            .get(name.as_str())
            .and_then(|id| state.categories.get(id))
            .cloned();
        Ok(category)
    }

    async fn list(&self) -> CategoryRepositoryResult<Vec<Category>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(categories)
    }

    async fn delete(&self, id: CategoryId) -> CategoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .categories
            .remove(&id)
            .ok_or(CategoryRepositoryError::NotFound(id))?;
        state.name_index.remove(removed.name().as_str());
        Ok(())
    }
}
