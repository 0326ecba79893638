//! Shared test helpers wiring the full in-memory service graph.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskforge::authz::Requester;
use taskforge::identity::{
    adapters::memory::{InMemoryIdentityStore, InMemoryProfileRepository},
    domain::User,
    ports::BasicPasswordPolicy,
    services::{AccountService, ProfileService, RegisterRequest, RegistrationService},
};
use taskforge::task::{
    adapters::memory::{
        InMemoryAttachmentRepository, InMemoryBlobStore, InMemoryCategoryRepository,
        InMemoryTaskRepository,
    },
    services::{CategorySeeder, CategoryService, TaskLifecycleService},
};

/// Registration service wired to in-memory adapters.
pub type TestRegistration =
    RegistrationService<InMemoryIdentityStore, InMemoryProfileRepository, DefaultClock>;
/// Profile service wired to in-memory adapters.
pub type TestProfiles =
    ProfileService<InMemoryProfileRepository, InMemoryIdentityStore, DefaultClock>;
/// Task lifecycle service wired to in-memory adapters.
pub type TestLifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryCategoryRepository,
    InMemoryAttachmentRepository,
    InMemoryBlobStore,
    InMemoryIdentityStore,
    DefaultClock,
>;

/// Fully wired in-memory application environment.
pub struct TestEnv {
    /// Registration and credential checks.
    pub registration: TestRegistration,
    /// Account directory and self-service updates.
    pub accounts: AccountService<InMemoryIdentityStore>,
    /// Profile reads and bookkeeping.
    pub profiles: TestProfiles,
    /// Task lifecycle orchestration.
    pub lifecycle: TestLifecycle,
    /// Category administration.
    pub categories: CategoryService<InMemoryCategoryRepository, InMemoryTaskRepository>,
    /// Default-category seeding.
    pub seeder: CategorySeeder<InMemoryCategoryRepository>,
    /// Raw profile repository for direct assertions.
    pub profile_repository: Arc<InMemoryProfileRepository>,
    /// Raw category repository for direct assertions.
    pub category_repository: Arc<InMemoryCategoryRepository>,
    /// Raw attachment repository for direct assertions.
    pub attachment_repository: Arc<InMemoryAttachmentRepository>,
    /// Raw blob store for direct assertions.
    pub blob_store: Arc<InMemoryBlobStore>,
}

impl TestEnv {
    /// Wires every service to a fresh set of in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let identity = Arc::new(InMemoryIdentityStore::new());
        let profile_repository = Arc::new(InMemoryProfileRepository::new());
        let task_repository = Arc::new(InMemoryTaskRepository::new());
        let category_repository = Arc::new(InMemoryCategoryRepository::new());
        let attachment_repository = Arc::new(InMemoryAttachmentRepository::new());
        let blob_store = Arc::new(InMemoryBlobStore::new());
        let clock = Arc::new(DefaultClock);

        Self {
            registration: RegistrationService::new(
                Arc::clone(&identity),
                Arc::clone(&profile_repository),
                Arc::new(BasicPasswordPolicy::default()),
                Arc::clone(&clock),
            ),
            accounts: AccountService::new(Arc::clone(&identity)),
            profiles: ProfileService::new(
                Arc::clone(&profile_repository),
                Arc::clone(&identity),
                Arc::clone(&clock),
            ),
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&task_repository),
                Arc::clone(&category_repository),
                Arc::clone(&attachment_repository),
                Arc::clone(&blob_store),
                Arc::clone(&identity),
                Arc::clone(&clock),
            ),
            categories: CategoryService::new(
                Arc::clone(&category_repository),
                Arc::clone(&task_repository),
            ),
            seeder: CategorySeeder::new(Arc::clone(&category_repository)),
            profile_repository,
            category_repository,
            attachment_repository,
            blob_store,
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh environment for each test.
#[fixture]
pub fn env() -> TestEnv {
    TestEnv::new()
}

/// Registers a user with a conventional strong password.
pub async fn register_user(env: &TestEnv, username: &str, email: &str) -> User {
    env.registration
        .register(RegisterRequest::new(
            username,
            email,
            "correct-horse-battery",
            "correct-horse-battery",
        ))
        .await
        .expect("registration should succeed")
}

/// Authenticated requester for the given user.
#[must_use]
pub fn as_requester(user: &User) -> Requester {
    Requester::authenticated(user.id())
}
