//! Per-resource permission policies.
//!
//! One policy per resource type, selected by the authorization call site.
//! Each policy answers "may this requester perform this operation on this
//! object?" as a plain boolean.

use super::{AccessError, Operation, Requester};
use crate::identity::domain::{Profile, User};
use crate::task::domain::Task;

/// Object-level permission check for a single resource type.
pub trait ResourcePolicy {
    /// The resource type the policy evaluates.
    type Resource;

    /// Returns `true` when the requester may perform the operation on the
    /// resource.
    #[must_use]
    fn allows(&self, requester: &Requester, operation: Operation, resource: &Self::Resource)
    -> bool;
}

/// Users may read any account but mutate only their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfOrReadOnly;

impl ResourcePolicy for SelfOrReadOnly {
    type Resource = User;

    fn allows(&self, requester: &Requester, operation: Operation, resource: &User) -> bool {
        operation.is_read() || requester.user_id() == Some(resource.id())
    }
}

/// Profiles may be read by anyone but mutated only by the owning user.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrReadOnly;

impl ResourcePolicy for OwnerOrReadOnly {
    type Resource = Profile;

    fn allows(&self, requester: &Requester, operation: Operation, resource: &Profile) -> bool {
        operation.is_read() || requester.user_id() == Some(resource.user_id())
    }
}

/// Tasks may be read by anyone but mutated only by an assigned user.
///
/// Creator status grants nothing; only membership in the assigned-user set
/// carries write access.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssigneeOrReadOnly;

impl ResourcePolicy for AssigneeOrReadOnly {
    type Resource = Task;

    fn allows(&self, requester: &Requester, operation: Operation, resource: &Task) -> bool {
        operation.is_read()
            || requester
                .user_id()
                .is_some_and(|user_id| resource.is_assigned(user_id))
    }
}

/// Evaluates a policy and converts a denial into [`AccessError::Forbidden`].
///
/// # Errors
///
/// Returns [`AccessError::Forbidden`] when the policy denies the operation.
pub fn enforce<P: ResourcePolicy>(
    policy: &P,
    requester: &Requester,
    operation: Operation,
    resource: &P::Resource,
) -> Result<(), AccessError> {
    if policy.allows(requester, operation, resource) {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}
