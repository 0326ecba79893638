//! Taskforge: multi-user task tracking core.
//!
//! This crate provides the domain model, permission evaluation, and task
//! lifecycle orchestration for a collaborative task tracker: users register
//! and receive a profile, create categorised tasks with due dates and file
//! attachments, and assign tasks to one another.
//!
//! # Architecture
//!
//! Taskforge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, blob store)
//!
//! # Modules
//!
//! - [`identity`]: User accounts, profiles, and registration
//! - [`authz`]: Object-level permission policies
//! - [`task`]: Categories, tasks, attachments, and lifecycle management

pub mod authz;
pub mod identity;
pub mod task;
