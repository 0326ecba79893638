//! `PostgreSQL` adapters for task persistence.

mod attachment;
mod category;
mod models;
mod repository;
mod schema;

pub use attachment::PostgresAttachmentRepository;
pub use category::PostgresCategoryRepository;
pub use repository::{PostgresTaskRepository, TaskPgPool};
