//! Object-level permission evaluation.
//!
//! Policies are pure predicates over (requester, operation, target object):
//! they never perform I/O, never mutate, and never fail. Converting a denied
//! check into an error is the caller's concern via [`enforce`].
//!
//! The coarse "is this actor authenticated at all" gate is separate from the
//! object-level check; services apply it first through
//! [`Requester::require_authenticated`].

mod error;
mod operation;
mod policies;
mod requester;

pub use error::AccessError;
pub use operation::Operation;
pub use policies::{AssigneeOrReadOnly, OwnerOrReadOnly, ResourcePolicy, SelfOrReadOnly, enforce};
pub use requester::Requester;
