//! Identity management: user accounts, profiles, and registration.
//!
//! The identity store itself (credential storage and verification) is an
//! external collaborator reached through a port; this module owns the
//! domain invariants around accounts and the registration workflow,
//! including the one-profile-per-user guarantee. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Read-side representations in [`views`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
