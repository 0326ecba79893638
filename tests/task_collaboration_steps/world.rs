//! Shared world state for task collaboration BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskforge::authz::Requester;
use taskforge::identity::{
    adapters::memory::{InMemoryIdentityStore, InMemoryProfileRepository},
    domain::User,
    ports::BasicPasswordPolicy,
    services::{RegisterRequest, RegistrationError, RegistrationService},
};
use taskforge::task::{
    adapters::memory::{
        InMemoryAttachmentRepository, InMemoryBlobStore, InMemoryCategoryRepository,
        InMemoryTaskRepository,
    },
    domain::{Task, TaskId},
    services::{CategorySeeder, TaskLifecycleError, TaskLifecycleService},
};

/// Registration service type used by the BDD world.
pub type TestRegistration =
    RegistrationService<InMemoryIdentityStore, InMemoryProfileRepository, DefaultClock>;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryCategoryRepository,
    InMemoryAttachmentRepository,
    InMemoryBlobStore,
    InMemoryIdentityStore,
    DefaultClock,
>;

/// Scenario world for task collaboration behaviour tests.
pub struct CollaborationWorld {
    /// Registration service under test.
    pub registration: TestRegistration,
    /// Task lifecycle service under test.
    pub lifecycle: TestLifecycle,
    /// Category repository for direct lookups.
    pub categories: Arc<InMemoryCategoryRepository>,
    /// Default-category seeder.
    pub seeder: CategorySeeder<InMemoryCategoryRepository>,
    /// Users registered during the scenario, by name.
    pub users: HashMap<String, User>,
    /// The task created during the scenario.
    pub task_id: Option<TaskId>,
    /// Result of the last lifecycle mutation.
    pub last_task_result: Option<Result<Task, TaskLifecycleError>>,
    /// Result of the last registration attempt.
    pub last_registration_result: Option<Result<User, RegistrationError>>,
}

impl CollaborationWorld {
    /// Creates a world wired to fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let identity = Arc::new(InMemoryIdentityStore::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let attachments = Arc::new(InMemoryAttachmentRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let clock = Arc::new(DefaultClock);

        let registration = RegistrationService::new(
            Arc::clone(&identity),
            Arc::clone(&profiles),
            Arc::new(BasicPasswordPolicy::default()),
            Arc::clone(&clock),
        );
        let lifecycle = TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&categories),
            Arc::clone(&attachments),
            Arc::clone(&blobs),
            Arc::clone(&identity),
            Arc::clone(&clock),
        );
        let seeder = CategorySeeder::new(Arc::clone(&categories));

        Self {
            registration,
            lifecycle,
            categories,
            seeder,
            users: HashMap::new(),
            task_id: None,
            last_task_result: None,
            last_registration_result: None,
        }
    }

    /// Returns the registered user with the given name.
    ///
    /// # Panics
    ///
    /// Panics when the scenario has not registered the user.
    #[must_use]
    pub fn user(&self, name: &str) -> &User {
        self.users
            .get(name)
            .unwrap_or_else(|| panic!("user {name} not registered in scenario"))
    }

    /// Returns an authenticated requester for the named user.
    #[must_use]
    pub fn requester(&self, name: &str) -> Requester {
        Requester::authenticated(self.user(name).id())
    }

    /// Returns the scenario task id.
    ///
    /// # Panics
    ///
    /// Panics when no task has been created yet.
    #[must_use]
    pub fn task_id(&self) -> TaskId {
        self.task_id.expect("no task created in scenario")
    }
}

impl Default for CollaborationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CollaborationWorld {
    CollaborationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a [`RegisterRequest`] from a user name.
#[must_use]
pub fn build_registration(name: &str) -> RegisterRequest {
    RegisterRequest::new(
        name,
        format!("{name}@example.com"),
        "correct-horse-battery",
        "correct-horse-battery",
    )
}
