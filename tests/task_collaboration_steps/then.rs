//! Then steps for task collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskforge::authz::AccessError;
use taskforge::identity::services::RegistrationError;
use taskforge::task::services::{TaskLifecycleError, UpdateTaskRequest};

#[then(r#""{name}" renames the task to "{title}""#)]
fn renames_the_task(
    world: &mut CollaborationWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id();
    let updated = run_async(world.lifecycle.update(
        &world.requester(&name),
        task_id,
        UpdateTaskRequest::new().with_title(&title),
    ))
    .wrap_err("rename scenario task")?;
    if updated.title().as_str() != title {
        return Err(eyre::eyre!("title was not applied"));
    }
    Ok(())
}

#[then(r#""{name}" is denied when renaming the task"#)]
fn denied_when_renaming(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id();
    let result = run_async(world.lifecycle.update(
        &world.requester(&name),
        task_id,
        UpdateTaskRequest::new().with_title("Hijacked"),
    ));
    match result {
        Err(TaskLifecycleError::Access(AccessError::Forbidden)) => Ok(()),
        Err(other) => Err(eyre::eyre!("expected a permission denial, got: {other}")),
        Ok(_) => Err(eyre::eyre!("expected a permission denial, update succeeded")),
    }
}

#[then(r#""{name}" deletes the task"#)]
fn deletes_the_task(world: &mut CollaborationWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id();
    run_async(world.lifecycle.delete(&world.requester(&name), task_id))
        .wrap_err("delete scenario task")
}

#[then("the task is gone")]
fn the_task_is_gone(world: &mut CollaborationWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id();
    let requester = world
        .users
        .values()
        .next()
        .map(|user| taskforge::authz::Requester::authenticated(user.id()))
        .ok_or_else(|| eyre::eyre!("no registered user in scenario"))?;
    let result = run_async(world.lifecycle.get(&requester, task_id));
    match result {
        Err(TaskLifecycleError::NotFound(_)) => Ok(()),
        Err(other) => Err(eyre::eyre!("expected not-found, got: {other}")),
        Ok(_) => Err(eyre::eyre!("expected not-found, task still exists")),
    }
}

#[then("the registration fails with messages for both taken fields")]
fn registration_fails_with_taken_fields(
    world: &mut CollaborationWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_registration_result
        .take()
        .ok_or_else(|| eyre::eyre!("no registration attempt recorded"))?;
    let Err(RegistrationError::Validation(error)) = result else {
        return Err(eyre::eyre!("expected a validation failure"));
    };
    let messages = error.field_messages();
    let email_taken = messages.contains(&("email", "Email already taken.".to_owned()));
    let username_taken = messages.contains(&("username", "Username already taken.".to_owned()));
    if !email_taken || !username_taken {
        return Err(eyre::eyre!(
            "expected both taken-field messages, got: {messages:?}"
        ));
    }
    Ok(())
}
