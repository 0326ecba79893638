//! Authentication gates and object-level permission integration tests.

use rstest::rstest;
use taskforge::authz::{AccessError, Requester};
use taskforge::identity::{
    ports::ProfileRepository,
    services::{AccountServiceError, ProfileServiceError, UserChanges},
};
use taskforge::task::services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest};

use super::helpers::{TestEnv, as_requester, env, register_user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_users_requires_authentication(env: TestEnv) {
    register_user(&env, "alice", "alice@example.com").await;

    let denied = env.accounts.list(&Requester::Anonymous).await;
    assert!(matches!(
        denied,
        Err(AccountServiceError::Access(AccessError::Unauthenticated))
    ));

    let bob = register_user(&env, "bob", "bob@example.com").await;
    let allowed = env
        .accounts
        .list(&as_requester(&bob))
        .await
        .expect("authenticated listing should succeed");
    assert_eq!(allowed.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profile_reads_are_public(env: TestEnv) {
    register_user(&env, "alice", "alice@example.com").await;

    let views = env
        .profiles
        .list()
        .await
        .expect("anonymous profile listing should succeed");
    assert_eq!(views.len(), 1);
    assert_eq!(views.first().expect("one view").user_name, "alice");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_may_only_patch_their_own_account(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let bob = register_user(&env, "bob", "bob@example.com").await;

    let own = env
        .accounts
        .update(
            &as_requester(&alice),
            alice.id(),
            UserChanges::new().with_username("alice_updated"),
        )
        .await
        .expect("self update should succeed");
    assert_eq!(own.username().as_str(), "alice_updated");

    let other = env
        .accounts
        .update(
            &as_requester(&bob),
            alice.id(),
            UserChanges::new().with_username("stolen"),
        )
        .await;
    assert!(matches!(
        other,
        Err(AccountServiceError::Access(AccessError::Forbidden))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profiles_may_only_be_touched_by_their_owner(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let bob = register_user(&env, "bob", "bob@example.com").await;
    let profile = env
        .profile_repository
        .find_by_user(alice.id())
        .await
        .expect("profile lookup should succeed")
        .expect("profile should exist");

    env.profiles
        .touch(&as_requester(&alice), profile.id())
        .await
        .expect("owner touch should succeed");

    let denied = env.profiles.touch(&as_requester(&bob), profile.id()).await;
    assert!(matches!(
        denied,
        Err(ProfileServiceError::Access(AccessError::Forbidden))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn any_authenticated_user_may_read_a_task_but_only_assignees_write(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let bob = register_user(&env, "bob", "bob@example.com").await;

    let task = env
        .lifecycle
        .create(
            &as_requester(&alice),
            CreateTaskRequest::new("Review PR", "").with_assignees([alice.id()]),
        )
        .await
        .expect("task creation should succeed");

    // Read access for a non-assigned user.
    let fetched = env
        .lifecycle
        .get(&as_requester(&bob), task.id())
        .await
        .expect("read should succeed");
    assert_eq!(fetched.id(), task.id());

    // Write access denied for the same user.
    let patch = env
        .lifecycle
        .update(
            &as_requester(&bob),
            task.id(),
            UpdateTaskRequest::new().with_title("Taken over"),
        )
        .await;
    assert!(matches!(
        patch,
        Err(TaskLifecycleError::Access(AccessError::Forbidden))
    ));

    let delete = env.lifecycle.delete(&as_requester(&bob), task.id()).await;
    assert!(matches!(
        delete,
        Err(TaskLifecycleError::Access(AccessError::Forbidden))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_task_access_is_rejected_before_object_checks(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let task = env
        .lifecycle
        .create(
            &as_requester(&alice),
            CreateTaskRequest::new("Private board", ""),
        )
        .await
        .expect("task creation should succeed");

    let listing = env.lifecycle.list(&Requester::Anonymous).await;
    assert!(matches!(
        listing,
        Err(TaskLifecycleError::Access(AccessError::Unauthenticated))
    ));

    let retrieval = env.lifecycle.get(&Requester::Anonymous, task.id()).await;
    assert!(matches!(
        retrieval,
        Err(TaskLifecycleError::Access(AccessError::Unauthenticated))
    ));
}
