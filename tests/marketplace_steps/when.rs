//! When steps for marketplace BDD scenarios.

use super::world::{MarketplaceWorld, run_async};
use gigboard::planning::{AssignmentStrategy, JobDecomposer};
use gigboard::task::domain::TaskStatus;
use rstest_bdd_macros::when;

#[when("the job is decomposed")]
fn job_is_decomposed(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    let brief = world.brief_mut()?.clone();
    world.decomposition = Some(JobDecomposer::new().decompose(&brief));
    Ok(())
}

#[when(r#"workers are assigned with the "{strategy}" strategy"#)]
fn workers_are_assigned(world: &mut MarketplaceWorld, strategy: String) -> Result<(), eyre::Report> {
    let chosen = AssignmentStrategy::try_from(strategy.as_str())
        .map_err(|err| eyre::eyre!("invalid strategy in scenario: {err}"))?;
    let job_id = world
        .posted
        .as_ref()
        .map(|posted| posted.job().id())
        .ok_or_else(|| eyre::eyre!("no job has been posted in this scenario"))?;
    world.last_assignment = Some(run_async(world.assignment.assign_workers(job_id, &chosen)));
    Ok(())
}

#[when(r#"task "{title}" is moved to "{status}""#)]
fn task_is_moved(
    world: &mut MarketplaceWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = world.task_titled(&title)?;
    world.last_transition = Some(run_async(world.workflow.transition(task.id(), target)));
    Ok(())
}

#[when(r#"a deliverable "{reference}" is attached to task "{title}""#)]
fn deliverable_is_attached(
    world: &mut MarketplaceWorld,
    reference: String,
    title: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let updated = run_async(world.workflow.add_deliverable(task.id(), reference))?;
    world.last_transition = Some(Ok(updated));
    Ok(())
}
