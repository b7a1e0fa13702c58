//! Shared test helpers for in-memory marketplace integration tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use gigboard::job::{
    adapters::memory::InMemoryJobRepository,
    domain::{CompanyId, Complexity, JobDraft},
    services::{JobAssignmentService, JobPostingService, PostJobRequest, PostedJob},
};
use gigboard::task::{adapters::memory::InMemoryTaskRepository, services::TaskWorkflowService};
use gigboard::worker::{
    adapters::memory::InMemoryWorkerDirectory,
    domain::{WorkerCandidate, WorkerRole},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Boxed error used by fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Posting service wired to in-memory adapters.
pub type MemoryPosting = JobPostingService<
    InMemoryJobRepository,
    InMemoryTaskRepository,
    InMemoryWorkerDirectory,
    DefaultClock,
>;

/// Assignment service wired to in-memory adapters.
pub type MemoryAssignment = JobAssignmentService<
    InMemoryJobRepository,
    InMemoryTaskRepository,
    InMemoryWorkerDirectory,
    DefaultClock,
>;

/// Workflow service wired to the in-memory task repository.
pub type MemoryWorkflow = TaskWorkflowService<InMemoryTaskRepository, DefaultClock>;

/// All three services sharing one set of in-memory adapters.
pub struct Marketplace {
    pub posting: MemoryPosting,
    pub assignment: Arc<MemoryAssignment>,
    pub workflow: MemoryWorkflow,
    pub company_id: CompanyId,
}

/// Converts string literals into owned tags.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// Builds a worker candidate.
///
/// # Errors
///
/// Returns an error if the name or rating is rejected.
pub fn worker(name: &str, skills: &[&str], rating: f64) -> Result<WorkerCandidate, BoxError> {
    Ok(WorkerCandidate::new(name, WorkerRole::Worker)?
        .with_skills(strings(skills))
        .with_rating(rating)?)
}

/// Frontend roster: two frontend specialists and one tester.
///
/// # Errors
///
/// Returns an error if a candidate cannot be built.
pub fn frontend_roster() -> Result<Vec<WorkerCandidate>, BoxError> {
    Ok(vec![
        worker("Ada", &["react", "html", "css", "javascript"], 4.8)?,
        worker("Grace", &["react", "css"], 4.2)?,
        worker("Linus", &["testing", "jest", "quality-assurance"], 4.9)?,
    ])
}

/// A medium storefront job with one frontend and one API requirement.
pub fn storefront_draft() -> JobDraft {
    JobDraft::new(
        "Storefront",
        1_200.0,
        Utc::now() + Duration::days(21),
        Complexity::Medium,
    )
    .with_description("Rebuild the storefront")
    .with_requirements(strings(&[
        "Create the frontend landing page",
        "Wire the checkout api",
    ]))
    .with_skills(strings(&["react", "css"]))
}

/// Creates a marketplace over fresh adapters seeded with `roster`.
pub fn marketplace_with(roster: Vec<WorkerCandidate>) -> Marketplace {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let workers = Arc::new(InMemoryWorkerDirectory::with_workers(roster));
    let clock = Arc::new(DefaultClock);
    Marketplace {
        posting: JobPostingService::new(
            Arc::clone(&jobs),
            Arc::clone(&tasks),
            Arc::clone(&workers),
            Arc::clone(&clock),
        ),
        assignment: Arc::new(JobAssignmentService::new(
            jobs,
            Arc::clone(&tasks),
            workers,
            Arc::clone(&clock),
        )),
        workflow: TaskWorkflowService::new(tasks, clock),
        company_id: CompanyId::new(),
    }
}

/// Provides a marketplace seeded with the frontend roster.
///
/// # Errors
///
/// Returns an error if the roster cannot be built.
#[fixture]
pub fn marketplace() -> Result<Marketplace, BoxError> {
    Ok(marketplace_with(frontend_roster()?))
}

/// Posts the storefront job through `marketplace`.
///
/// # Errors
///
/// Returns an error if posting fails.
pub async fn post_storefront(marketplace: &Marketplace) -> Result<PostedJob, BoxError> {
    Ok(marketplace
        .posting
        .post_job(PostJobRequest::new(marketplace.company_id, storefront_draft()))
        .await?)
}
