//! `PostgreSQL` adapters for identity persistence.

mod models;
mod profile;
mod schema;
mod store;

pub use profile::PostgresProfileRepository;
pub use store::{IdentityPgPool, PostgresIdentityStore};
