//! Then steps for marketplace BDD scenarios.

use super::world::{MarketplaceWorld, run_async, skill_list};
use gigboard::job::{domain::JobStatus, services::JobAssignmentError};
use gigboard::planning::{AssignmentError, DecompositionError};
use gigboard::task::{
    domain::{MicroTask, Priority, TaskDomainError, TaskStatus},
    services::TaskWorkflowError,
};
use rstest_bdd_macros::then;

const TOLERANCE: f64 = 1e-9;

fn decomposed(world: &MarketplaceWorld) -> Result<&[MicroTask], eyre::Report> {
    match world.decomposition.as_ref() {
        Some(Ok(tasks)) => Ok(tasks),
        Some(Err(err)) => Err(eyre::eyre!("decomposition failed: {err}")),
        None => Err(eyre::eyre!("the job has not been decomposed")),
    }
}

fn decomposed_task(world: &MarketplaceWorld, position: usize) -> Result<&MicroTask, eyre::Report> {
    decomposed(world)?
        .get(position.saturating_sub(1))
        .ok_or_else(|| eyre::eyre!("no task at position {position}"))
}

#[then("{count:usize} tasks are produced")]
fn tasks_are_produced(world: &MarketplaceWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = decomposed(world)?.len();
    eyre::ensure!(actual == count, "expected {count} tasks, found {actual}");
    Ok(())
}

#[then(r#"task {position:usize} is titled "{title}""#)]
fn task_is_titled(
    world: &MarketplaceWorld,
    position: usize,
    title: String,
) -> Result<(), eyre::Report> {
    let task = decomposed_task(world, position)?;
    eyre::ensure!(
        task.title == title,
        "expected title {title:?}, found {:?}",
        task.title
    );
    Ok(())
}

#[then(r#"task {position:usize} requires skills "{skills}""#)]
fn task_requires_skills(
    world: &MarketplaceWorld,
    position: usize,
    skills: String,
) -> Result<(), eyre::Report> {
    let task = decomposed_task(world, position)?;
    let expected = skill_list(&skills);
    eyre::ensure!(
        task.skills == expected,
        "expected skills {expected:?}, found {:?}",
        task.skills
    );
    Ok(())
}

#[then("task {position:usize} has a budget of {budget:f64}")]
fn task_has_budget(
    world: &MarketplaceWorld,
    position: usize,
    budget: f64,
) -> Result<(), eyre::Report> {
    let task = decomposed_task(world, position)?;
    eyre::ensure!(
        (task.budget - budget).abs() < TOLERANCE,
        "expected budget {budget}, found {}",
        task.budget
    );
    Ok(())
}

#[then("task {position:usize} is estimated at {hours:f64} hours")]
fn task_is_estimated_at(
    world: &MarketplaceWorld,
    position: usize,
    hours: f64,
) -> Result<(), eyre::Report> {
    let task = decomposed_task(world, position)?;
    eyre::ensure!(
        (task.estimated_hours - hours).abs() < TOLERANCE,
        "expected {hours} hours, found {}",
        task.estimated_hours
    );
    Ok(())
}

#[then(r#"task {position:usize} has priority "{priority}""#)]
fn task_has_priority(
    world: &MarketplaceWorld,
    position: usize,
    priority: String,
) -> Result<(), eyre::Report> {
    let expected = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let task = decomposed_task(world, position)?;
    eyre::ensure!(
        task.priority == expected,
        "expected priority {expected}, found {}",
        task.priority
    );
    Ok(())
}

#[then("decomposition fails with an invalid budget")]
fn decomposition_fails_with_invalid_budget(world: &MarketplaceWorld) -> Result<(), eyre::Report> {
    let result = world
        .decomposition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the job has not been decomposed"))?;
    eyre::ensure!(
        matches!(result, Err(DecompositionError::InvalidBudget(_))),
        "expected InvalidBudget, got {result:?}"
    );
    Ok(())
}

#[then(r#"task "{title}" is assigned to "{name}" with a "{percent}" skill match"#)]
fn task_is_assigned_to(
    world: &MarketplaceWorld,
    title: String,
    name: String,
    percent: String,
) -> Result<(), eyre::Report> {
    let report = match world.last_assignment.as_ref() {
        Some(Ok(report)) => report,
        Some(Err(err)) => return Err(eyre::eyre!("assignment failed: {err}")),
        None => return Err(eyre::eyre!("no assignment has run")),
    };
    let task = world.task_titled(&title)?;
    let assignment = report
        .assignments()
        .iter()
        .find(|assignment| assignment.task_id == task.id())
        .ok_or_else(|| eyre::eyre!("task {title:?} was not assigned"))?;
    eyre::ensure!(
        assignment.worker_name == name,
        "expected {name}, found {}",
        assignment.worker_name
    );
    eyre::ensure!(
        assignment.skill_match == percent,
        "expected {percent} skill match, found {}",
        assignment.skill_match
    );
    eyre::ensure!(
        task.assigned_to() == Some(assignment.worker_id),
        "stored task does not record the assignee"
    );
    Ok(())
}

#[then("{count:usize} tasks remain pending")]
fn tasks_remain_pending(world: &MarketplaceWorld, count: usize) -> Result<(), eyre::Report> {
    let report = match world.last_assignment.as_ref() {
        Some(Ok(report)) => report,
        Some(Err(err)) => return Err(eyre::eyre!("assignment failed: {err}")),
        None => return Err(eyre::eyre!("no assignment has run")),
    };
    let actual = report.pending().len();
    eyre::ensure!(actual == count, "expected {count} pending tasks, found {actual}");
    Ok(())
}

#[then(r#"the job status is "{status}""#)]
fn job_status_is(world: &MarketplaceWorld, status: String) -> Result<(), eyre::Report> {
    let expected = JobStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid job status in scenario: {err}"))?;
    let job_id = world
        .posted
        .as_ref()
        .map(|posted| posted.job().id())
        .ok_or_else(|| eyre::eyre!("no job has been posted in this scenario"))?;
    let job = run_async(world.posting.find_job(job_id))?
        .ok_or_else(|| eyre::eyre!("posted job is missing"))?;
    eyre::ensure!(
        job.status() == expected,
        "expected job status {expected}, found {}",
        job.status()
    );
    Ok(())
}

#[then("the assignment fails because no workers are eligible")]
fn assignment_fails_without_eligible_workers(
    world: &MarketplaceWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_assignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no assignment has run"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(JobAssignmentError::Assignment(AssignmentError::NoEligibleWorkers))
        ),
        "expected NoEligibleWorkers, got {result:?}"
    );
    Ok(())
}

#[then(r#"task "{title}" has status "{status}""#)]
fn task_has_status(
    world: &MarketplaceWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid task status in scenario: {err}"))?;
    let task = world.task_titled(&title)?;
    eyre::ensure!(
        task.status() == expected,
        "expected task status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"task "{title}" lists {count:usize} deliverable"#)]
fn task_has_deliverables(
    world: &MarketplaceWorld,
    title: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let actual = task.deliverables().len();
    eyre::ensure!(actual == count, "expected {count} deliverables, found {actual}");
    Ok(())
}

#[then("the transition is rejected")]
fn transition_is_rejected(world: &MarketplaceWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no transition has run"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(TaskWorkflowError::Domain(
                TaskDomainError::InvalidStateTransition { .. }
            ))
        ),
        "expected InvalidStateTransition, got {result:?}"
    );
    Ok(())
}
