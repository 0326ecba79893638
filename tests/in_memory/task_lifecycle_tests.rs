//! End-to-end task lifecycle integration tests.

use chrono::Days;
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use taskforge::task::services::{CreateTaskRequest, NewUpload, TaskLifecycleError, UpdateTaskRequest};

use super::helpers::{TestEnv, as_requester, env, register_user};

fn tomorrow() -> chrono::NaiveDate {
    DefaultClock
        .utc()
        .date_naive()
        .checked_add_days(Days::new(1))
        .expect("valid date")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_travels_through_its_whole_lifecycle(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let bob = register_user(&env, "bob", "bob@example.com").await;
    let requester = as_requester(&alice);

    env.seeder
        .ensure_defaults()
        .await
        .expect("seeding should succeed");
    let development = env
        .categories
        .create(&requester, "Development")
        .await
        .expect("category should resolve");

    // Create, assigned to alice, due tomorrow, with an attachment.
    let task = env
        .lifecycle
        .create(
            &requester,
            CreateTaskRequest::new("Ship the feature", "Behind a flag first")
                .with_due_date(tomorrow())
                .with_category(development.id())
                .with_assignees([alice.id()])
                .with_upload(NewUpload::new("plan.md", b"# Plan".to_vec())),
        )
        .await
        .expect("task creation should succeed");

    // Alice may patch the title.
    let renamed = env
        .lifecycle
        .update(
            &requester,
            task.id(),
            UpdateTaskRequest::new().with_title("Ship the feature safely"),
        )
        .await
        .expect("assignee update should succeed");
    assert_eq!(renamed.title().as_str(), "Ship the feature safely");

    // Bob, not assigned, is rejected.
    let denied = env
        .lifecycle
        .update(
            &as_requester(&bob),
            task.id(),
            UpdateTaskRequest::new().with_title("Not yours"),
        )
        .await;
    assert!(matches!(denied, Err(TaskLifecycleError::Access(_))));

    // Alice hands the task over to bob by reconciling the set.
    let reassigned = env
        .lifecycle
        .update(
            &requester,
            task.id(),
            UpdateTaskRequest::new().with_assignees([bob.id()]),
        )
        .await
        .expect("reassignment should succeed");
    assert!(reassigned.is_assigned(bob.id()));
    assert!(!reassigned.is_assigned(alice.id()));

    // Now the roles are reversed.
    let alice_denied = env
        .lifecycle
        .delete(&requester, task.id())
        .await;
    assert!(matches!(
        alice_denied,
        Err(TaskLifecycleError::Access(_))
    ));
    env.lifecycle
        .delete(&as_requester(&bob), task.id())
        .await
        .expect("assignee delete should succeed");

    let gone = env.lifecycle.get(&requester, task.id()).await;
    assert!(matches!(gone, Err(TaskLifecycleError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_and_detail_views_expose_the_documented_shapes(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let requester = as_requester(&alice);

    let testing = env
        .categories
        .create(&requester, "Testing")
        .await
        .expect("category should resolve");
    let task = env
        .lifecycle
        .create(
            &requester,
            CreateTaskRequest::new("Write regression tests", "For the parser")
                .with_category(testing.id())
                .with_assignees([alice.id()])
                .with_upload(NewUpload::new("cases.txt", b"edge cases".to_vec())),
        )
        .await
        .expect("task creation should succeed");

    let list = env
        .lifecycle
        .list_views(&requester)
        .await
        .expect("listing should succeed");
    let entry = list.first().expect("one task listed");
    assert_eq!(entry.category.as_deref(), Some("Testing"));

    let serialized = serde_json::to_value(entry).expect("list view serializes");
    assert_eq!(serialized["category"], "Testing");
    assert!(serialized.get("assigned_users").is_none());
    assert!(serialized.get("upload_files").is_none());

    let detail = env
        .lifecycle
        .detail_view(&requester, task.id())
        .await
        .expect("detail view should render");
    assert_eq!(detail.assigned_users.len(), 1);
    assert_eq!(detail.upload_files.len(), 1);
    assert!(!detail.is_overdue);

    let serialized_detail = serde_json::to_value(&detail).expect("detail view serializes");
    assert_eq!(serialized_detail["status"], "pending");
    assert_eq!(serialized_detail["priority"], "medium");
    assert_eq!(
        serialized_detail["assigned_users"][0]["username"],
        "alice"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_bytes_are_retrievable_from_the_blob_store(env: TestEnv) {
    let alice = register_user(&env, "alice", "alice@example.com").await;
    let requester = as_requester(&alice);

    let task = env
        .lifecycle
        .create(
            &requester,
            CreateTaskRequest::new("With artifact", "")
                .with_upload(NewUpload::new("build.log", b"ok".to_vec())),
        )
        .await
        .expect("task creation should succeed");

    let detail = env
        .lifecycle
        .detail_view(&requester, task.id())
        .await
        .expect("detail view should render");
    let url = taskforge::task::domain::StoredFileUrl::new(
        detail.upload_files.first().expect("one file").url.clone(),
    );
    let bytes = env.blob_store.fetch(&url).expect("blob should exist");
    assert_eq!(bytes, b"ok");
}
