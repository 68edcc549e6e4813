//! When steps for task synchronisation BDD scenarios.

use super::world::{TaskSyncWorld, run_async};
use rstest_bdd_macros::when;
use todomaster::task::{
    domain::{Priority, TaskPatch},
    services::CreateTaskRequest,
};

#[when(r#"the user toggles "{title}""#)]
fn toggle_task(world: &mut TaskSyncWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let result = run_async(world.service.toggle_status(task.id())).map(|_| ());
    world.last_intent_result = Some(result);
    Ok(())
}

#[when(r#"the user renames "{title}" to "{new_title}""#)]
fn rename_task(
    world: &mut TaskSyncWorld,
    title: String,
    new_title: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let result = run_async(
        world
            .service
            .update(task.id(), TaskPatch::new().with_title(new_title)),
    );
    world.last_intent_result = Some(result);
    Ok(())
}

#[when(r#"the user creates a "{priority}" priority task "{title}""#)]
fn create_task(
    world: &mut TaskSyncWorld,
    priority: String,
    title: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user_id()?;
    let parsed = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let result = run_async(
        world
            .service
            .create(&user_id, CreateTaskRequest::new(title, parsed)),
    );
    world.last_create_result = Some(result);
    Ok(())
}
