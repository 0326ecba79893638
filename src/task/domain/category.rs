//! Category entity and its validated name.

use super::{CategoryId, TaskValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category names that must exist after system initialization.
pub const DEFAULT_CATEGORY_NAMES: [&str; 5] =
    ["Development", "Design", "Testing", "Documentation", "Other"];

/// Validated, unique category name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Maximum stored length in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated category name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyCategoryName`] or
    /// [`TaskValidationError::CategoryNameTooLong`] when the value is
    /// malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskValidationError::EmptyCategoryName);
        }
        if normalized.chars().count() > Self::MAX_LENGTH {
            return Err(TaskValidationError::CategoryNameTooLong(Self::MAX_LENGTH));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the category name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
}

impl Category {
    /// Creates a new category with a fresh identifier.
    #[must_use]
    pub fn new(name: CategoryName) -> Self {
        Self {
            id: CategoryId::new(),
            name,
        }
    }

    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub const fn from_parts(id: CategoryId, name: CategoryName) -> Self {
        Self { id, name }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the category name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }
}
