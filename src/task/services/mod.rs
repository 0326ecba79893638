//! Application services for task tracking.

mod categories;
mod lifecycle;
mod seed;

pub use categories::{CategoryService, CategoryServiceError, CategoryServiceResult};
pub use lifecycle::{
    CreateTaskRequest, NewUpload, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
pub use seed::{CategorySeedError, CategorySeeder};
