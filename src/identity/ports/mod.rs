//! Port contracts for identity management.
//!
//! Ports define infrastructure-agnostic interfaces for the external
//! credential service and profile persistence.

pub mod password;
pub mod repository;
pub mod store;

pub use password::{BasicPasswordPolicy, PasswordPolicy, PasswordPolicyViolation};
pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};
pub use store::{IdentityStore, IdentityStoreError, IdentityStoreResult, NewUser};
