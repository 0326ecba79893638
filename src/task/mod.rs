//! Task tracking: categories, tasks, attachments, and their lifecycle.
//!
//! Implements validated task creation and partial updates (due-date
//! invariants, assignment-set reconciliation, attachment uploads through
//! the external blob store) plus idempotent default-category seeding. The
//! module follows hexagonal architecture:
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
