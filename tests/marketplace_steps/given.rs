//! Given steps for marketplace BDD scenarios.

use super::world::{MarketplaceWorld, brief, run_async, skill_list};
use eyre::WrapErr;
use gigboard::job::{domain::Complexity, services::PostJobRequest};
use gigboard::planning::AssignmentStrategy;
use gigboard::worker::{
    domain::{WorkerCandidate, WorkerRole},
    ports::WorkerDirectory,
};
use rstest_bdd_macros::given;

#[given(r#"a "{complexity}" job "{title}" with budget {budget:f64}"#)]
fn job_with_budget(
    world: &mut MarketplaceWorld,
    complexity: String,
    title: String,
    budget: f64,
) -> Result<(), eyre::Report> {
    let level = Complexity::try_from(complexity.as_str())
        .map_err(|err| eyre::eyre!("invalid complexity in scenario: {err}"))?;
    world.brief = Some(brief(title, budget, level));
    Ok(())
}

#[given(r#"the job requires "{requirement}""#)]
fn job_requires(world: &mut MarketplaceWorld, requirement: String) -> Result<(), eyre::Report> {
    world.brief_mut()?.requirements.push(requirement);
    Ok(())
}

#[given(r#"the job asks for skill "{skill}""#)]
fn job_asks_for_skill(world: &mut MarketplaceWorld, skill: String) -> Result<(), eyre::Report> {
    world.brief_mut()?.skills.push(skill);
    Ok(())
}

fn register_worker(
    world: &MarketplaceWorld,
    name: &str,
    skills: &str,
    rating: f64,
    available: bool,
) -> Result<(), eyre::Report> {
    let worker = WorkerCandidate::new(name, WorkerRole::Worker)
        .wrap_err("build scenario worker")?
        .with_skills(skill_list(skills))
        .with_availability(available)
        .with_rating(rating)
        .wrap_err("rate scenario worker")?;
    run_async(world.workers.register(&worker)).wrap_err("register scenario worker")?;
    Ok(())
}

#[given(r#"a worker "{name}" skilled in "{skills}" rated {rating:f64}"#)]
fn available_worker(
    world: &mut MarketplaceWorld,
    name: String,
    skills: String,
    rating: f64,
) -> Result<(), eyre::Report> {
    register_worker(world, &name, &skills, rating, true)
}

#[given(r#"an unavailable worker "{name}" skilled in "{skills}" rated {rating:f64}"#)]
fn unavailable_worker(
    world: &mut MarketplaceWorld,
    name: String,
    skills: String,
    rating: f64,
) -> Result<(), eyre::Report> {
    register_worker(world, &name, &skills, rating, false)
}

#[given("the job has been posted")]
fn job_has_been_posted(world: &mut MarketplaceWorld) -> Result<(), eyre::Report> {
    let request = PostJobRequest::new(world.company_id, world.draft()?);
    let posted = run_async(world.posting.post_job(request)).wrap_err("post scenario job")?;
    world.posted = Some(posted);
    Ok(())
}

#[given(r#"workers have been assigned with the "{strategy}" strategy"#)]
fn workers_have_been_assigned(
    world: &mut MarketplaceWorld,
    strategy: String,
) -> Result<(), eyre::Report> {
    let chosen = AssignmentStrategy::try_from(strategy.as_str())
        .map_err(|err| eyre::eyre!("invalid strategy in scenario: {err}"))?;
    let job_id = world
        .posted
        .as_ref()
        .map(|posted| posted.job().id())
        .ok_or_else(|| eyre::eyre!("no job has been posted in this scenario"))?;
    let report = run_async(world.assignment.assign_workers(job_id, &chosen))
        .wrap_err("assign workers in scenario setup")?;
    world.last_assignment = Some(Ok(report));
    Ok(())
}
