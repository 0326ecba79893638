//! When steps for task collaboration BDD scenarios.

use super::world::{CollaborationWorld, build_registration, run_async};
use chrono::Days;
use eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use rstest_bdd_macros::when;
use taskforge::task::{domain::CategoryName, ports::CategoryRepository};
use taskforge::task::services::CreateTaskRequest;

#[when(
    r#""{name}" creates a task "{title}" in category "{category}" due tomorrow assigned to themselves"#
)]
fn creates_a_task(
    world: &mut CollaborationWorld,
    name: String,
    title: String,
    category: String,
) -> Result<(), eyre::Report> {
    let category_name = CategoryName::new(category).wrap_err("parse category name")?;
    let seeded = run_async(world.categories.find_by_name(&category_name))
        .wrap_err("look up category")?
        .ok_or_else(|| eyre::eyre!("category {category_name} not seeded"))?;
    let due = DefaultClock
        .utc()
        .date_naive()
        .checked_add_days(Days::new(1))
        .ok_or_else(|| eyre::eyre!("tomorrow out of range"))?;

    let request = CreateTaskRequest::new(title, "Created by a behaviour scenario")
        .with_due_date(due)
        .with_category(seeded.id())
        .with_assignees([world.user(&name).id()]);
    let task = run_async(world.lifecycle.create(&world.requester(&name), request))
        .wrap_err("create scenario task")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[when(r#"a second registration for "{name}" is submitted"#)]
fn duplicate_registration_submitted(world: &mut CollaborationWorld, name: String) {
    let result = run_async(world.registration.register(build_registration(&name)));
    world.last_registration_result = Some(result);
}
