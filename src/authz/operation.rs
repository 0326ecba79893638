//! Requested operation kinds evaluated by permission policies.

/// Operation requested against a resource.
///
/// Read operations have no side effects; everything else is a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch a single object.
    Retrieve,
    /// List a collection.
    List,
    /// Create a new object.
    Create,
    /// Replace an existing object.
    Update,
    /// Modify a subset of an existing object's fields.
    PartialUpdate,
    /// Remove an existing object.
    Delete,
}

impl Operation {
    /// Returns `true` for side-effect-free operations.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Retrieve | Self::List)
    }

    /// Returns `true` for mutating operations.
    #[must_use]
    pub const fn is_write(self) -> bool {
        !self.is_read()
    }
}
