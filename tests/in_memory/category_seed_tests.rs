//! Idempotent seeding integration tests.

use rstest::rstest;
use taskforge::task::{domain::DEFAULT_CATEGORY_NAMES, ports::CategoryRepository};

use super::helpers::{TestEnv, env};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeding_twice_produces_exactly_five_rows(env: TestEnv) {
    let first = env
        .seeder
        .ensure_defaults()
        .await
        .expect("first run should succeed");
    let second = env
        .seeder
        .ensure_defaults()
        .await
        .expect("second run should succeed");

    assert_eq!(first, 5);
    assert_eq!(second, 0);

    let categories = env
        .category_repository
        .list()
        .await
        .expect("listing should succeed");
    assert_eq!(categories.len(), DEFAULT_CATEGORY_NAMES.len());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn startup_seeding_never_panics(env: TestEnv) {
    let created = env.seeder.ensure_defaults_or_log().await;
    assert_eq!(created, 5);
}
