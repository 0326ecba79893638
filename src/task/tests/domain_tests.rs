//! Domain validation tests for tasks, categories, and attachments.

use crate::identity::domain::UserId;
use crate::task::domain::{
    CategoryName, FieldUpdate, NewTaskData, PersistedTaskData, Task, TaskChanges, TaskId,
    TaskPriority, TaskStatus, TaskTitle, TaskValidationError, listing_order,
};
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use std::collections::BTreeSet;

/// Clock pinned to a fixed instant for date assertions.
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn clock() -> FixedClock {
    // 2026-03-15 12:00:00 UTC
    FixedClock(
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0)
            .single()
            .expect("valid instant"),
    )
}

fn today(clock: &FixedClock) -> NaiveDate {
    clock.utc().date_naive()
}

fn new_task_data(due_date: Option<NaiveDate>) -> NewTaskData {
    NewTaskData {
        title: TaskTitle::new("Write deployment runbook").expect("valid title"),
        description: "Cover rollback and smoke checks".to_owned(),
        due_date,
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        category_id: None,
        created_by: Some(UserId::new()),
    }
}

fn persisted_task(due_date: Option<NaiveDate>, status: TaskStatus, clock: &FixedClock) -> Task {
    let timestamp = clock.utc();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new("Stored task").expect("valid title"),
        description: String::new(),
        due_date,
        priority: TaskPriority::Low,
        status,
        category_id: None,
        assigned_users: BTreeSet::new(),
        created_by: None,
        created_at: timestamp,
        updated_at: timestamp,
    })
}

#[rstest]
#[case("pending", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
fn task_status_round_trips_through_storage_strings(
    #[case] raw: &str,
    #[case] status: TaskStatus,
) {
    assert_eq!(TaskStatus::try_from(raw), Ok(status));
    assert_eq!(status.as_str(), raw);
}

#[rstest]
fn task_status_rejects_unknown_values() {
    assert!(TaskStatus::try_from("cancelled").is_err());
}

#[rstest]
#[case("low", TaskPriority::Low)]
#[case("medium", TaskPriority::Medium)]
#[case("high", TaskPriority::High)]
fn task_priority_round_trips_through_storage_strings(
    #[case] raw: &str,
    #[case] priority: TaskPriority,
) {
    assert_eq!(TaskPriority::try_from(raw), Ok(priority));
    assert_eq!(priority.as_str(), raw);
}

#[rstest]
fn task_priority_orders_semantically() {
    assert!(TaskPriority::High > TaskPriority::Medium);
    assert!(TaskPriority::Medium > TaskPriority::Low);
}

#[rstest]
fn task_title_trims_and_validates() {
    let title = TaskTitle::new("  Fix login flow  ").expect("title should parse");
    assert_eq!(title.as_str(), "Fix login flow");
    assert_eq!(
        TaskTitle::new("   "),
        Err(TaskValidationError::EmptyTitle)
    );
    assert_eq!(
        TaskTitle::new("x".repeat(TaskTitle::MAX_LENGTH + 1)),
        Err(TaskValidationError::TitleTooLong(TaskTitle::MAX_LENGTH))
    );
}

#[rstest]
fn category_name_trims_and_validates() {
    let name = CategoryName::new(" Development ").expect("name should parse");
    assert_eq!(name.as_str(), "Development");
    assert_eq!(
        CategoryName::new(""),
        Err(TaskValidationError::EmptyCategoryName)
    );
}

#[rstest]
fn creating_a_task_with_a_past_due_date_is_rejected(clock: FixedClock) {
    let yesterday = today(&clock).pred_opt().expect("valid date");
    let result = Task::new(new_task_data(Some(yesterday)), &clock);
    assert_eq!(result, Err(TaskValidationError::DueDateInPast));
    assert_eq!(
        TaskValidationError::DueDateInPast.to_string(),
        "Due date cannot be in the past."
    );
}

#[rstest]
fn creating_a_task_due_today_or_later_succeeds(clock: FixedClock) {
    assert!(Task::new(new_task_data(Some(today(&clock))), &clock).is_ok());
    let tomorrow = today(&clock).succ_opt().expect("valid date");
    assert!(Task::new(new_task_data(Some(tomorrow)), &clock).is_ok());
    assert!(Task::new(new_task_data(None), &clock).is_ok());
}

#[rstest]
fn is_overdue_requires_a_past_due_date_and_an_open_status(clock: FixedClock) {
    let yesterday = today(&clock).pred_opt().expect("valid date");
    let tomorrow = today(&clock).succ_opt().expect("valid date");

    let undated = persisted_task(None, TaskStatus::Pending, &clock);
    assert!(!undated.is_overdue(&clock));

    let due_later = persisted_task(Some(tomorrow), TaskStatus::Pending, &clock);
    assert!(!due_later.is_overdue(&clock));

    let due_today = persisted_task(Some(today(&clock)), TaskStatus::Pending, &clock);
    assert!(!due_today.is_overdue(&clock));

    let past_open = persisted_task(Some(yesterday), TaskStatus::InProgress, &clock);
    assert!(past_open.is_overdue(&clock));

    let past_done = persisted_task(Some(yesterday), TaskStatus::Done, &clock);
    assert!(!past_done.is_overdue(&clock));
}

#[rstest]
fn applying_a_past_due_date_is_rejected(clock: FixedClock) {
    let mut task = Task::new(new_task_data(None), &clock).expect("valid task");
    let yesterday = today(&clock).pred_opt().expect("valid date");

    let changes = TaskChanges {
        due_date: FieldUpdate::Set(yesterday),
        ..TaskChanges::default()
    };
    assert_eq!(
        task.apply(changes, &clock),
        Err(TaskValidationError::DueDateInPast)
    );
}

#[rstest]
fn stored_past_due_dates_are_not_revalidated_on_unrelated_updates(clock: FixedClock) {
    // The invariant is write-time only: a task that became past-due in
    // storage still accepts updates that leave the due date untouched.
    let yesterday = today(&clock).pred_opt().expect("valid date");
    let mut task = persisted_task(Some(yesterday), TaskStatus::Pending, &clock);

    let changes = TaskChanges {
        title: Some(TaskTitle::new("Renamed").expect("valid title")),
        ..TaskChanges::default()
    };
    task.apply(changes, &clock).expect("update should succeed");
    assert_eq!(task.title().as_str(), "Renamed");
    assert_eq!(task.due_date(), Some(yesterday));
}

#[rstest]
fn applying_changes_merges_fields_and_touches_the_timestamp(clock: FixedClock) {
    let mut task = Task::new(new_task_data(Some(today(&clock))), &clock).expect("valid task");
    let later = FixedClock(clock.utc() + chrono::Duration::hours(3));

    let changes = TaskChanges {
        description: Some("Refined scope".to_owned()),
        due_date: FieldUpdate::Clear,
        status: Some(TaskStatus::InProgress),
        ..TaskChanges::default()
    };
    task.apply(changes, &later).expect("update should succeed");

    assert_eq!(task.description(), "Refined scope");
    assert_eq!(task.due_date(), None);
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.title().as_str(), "Write deployment runbook");
    assert_eq!(task.updated_at(), later.utc());
    assert!(task.created_at() < task.updated_at());
}

#[rstest]
fn assignment_reconciliation_replaces_the_whole_set(clock: FixedClock) {
    let first = UserId::new();
    let second = UserId::new();
    let mut task = Task::new(new_task_data(None), &clock).expect("valid task");

    task.replace_assignees([first, second, first]);
    assert_eq!(task.assigned_users().len(), 2);
    assert!(task.is_assigned(first));

    task.replace_assignees([]);
    assert!(task.assigned_users().is_empty());
    assert!(!task.is_assigned(first));
}

#[rstest]
fn listing_order_sorts_dated_tasks_first_by_recency_then_priority() {
    let clock = DefaultClock;
    let base = clock.utc().date_naive();
    let near = base.checked_add_days(Days::new(1)).expect("valid date");
    let far = base.checked_add_days(Days::new(30)).expect("valid date");

    let mut make = |due: Option<NaiveDate>, priority: TaskPriority| {
        let mut data = new_task_data(due);
        data.priority = priority;
        Task::new(data, &clock).expect("valid task")
    };

    let undated = make(None, TaskPriority::High);
    let near_low = make(Some(near), TaskPriority::Low);
    let far_high = make(Some(far), TaskPriority::High);
    let far_low = make(Some(far), TaskPriority::Low);

    let mut tasks = vec![undated.clone(), near_low.clone(), far_high.clone(), far_low.clone()];
    tasks.sort_by(listing_order);

    let ids: Vec<_> = tasks.iter().map(Task::id).collect();
    assert_eq!(
        ids,
        vec![far_high.id(), far_low.id(), near_low.id(), undated.id()]
    );
}
