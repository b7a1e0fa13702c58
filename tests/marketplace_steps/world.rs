//! Shared world state for marketplace BDD scenarios.

use std::sync::Arc;

use chrono::{Duration, Utc};
use gigboard::job::{
    adapters::memory::InMemoryJobRepository,
    domain::{CompanyId, Complexity, JobBrief, JobDraft},
    services::{AssignmentReport, JobAssignmentError, JobAssignmentService, JobPostingService, PostedJob},
};
use gigboard::planning::DecompositionError;
use gigboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{MicroTask, Task},
    services::{TaskWorkflowError, TaskWorkflowService},
};
use gigboard::worker::adapters::memory::InMemoryWorkerDirectory;
use mockable::DefaultClock;
use rstest::fixture;

/// Posting service used by the BDD world.
pub type TestPostingService = JobPostingService<
    InMemoryJobRepository,
    InMemoryTaskRepository,
    InMemoryWorkerDirectory,
    DefaultClock,
>;

/// Assignment service used by the BDD world.
pub type TestAssignmentService = JobAssignmentService<
    InMemoryJobRepository,
    InMemoryTaskRepository,
    InMemoryWorkerDirectory,
    DefaultClock,
>;

/// Workflow service used by the BDD world.
pub type TestWorkflowService = TaskWorkflowService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for marketplace behaviour tests.
pub struct MarketplaceWorld {
    pub posting: TestPostingService,
    pub assignment: TestAssignmentService,
    pub workflow: TestWorkflowService,
    pub workers: Arc<InMemoryWorkerDirectory>,
    pub company_id: CompanyId,
    pub brief: Option<JobBrief>,
    pub decomposition: Option<Result<Vec<MicroTask>, DecompositionError>>,
    pub posted: Option<PostedJob>,
    pub last_assignment: Option<Result<AssignmentReport, JobAssignmentError>>,
    pub last_transition: Option<Result<Task, TaskWorkflowError>>,
}

impl MarketplaceWorld {
    /// Creates a world over empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let jobs = Arc::new(InMemoryJobRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let workers = Arc::new(InMemoryWorkerDirectory::new());
        let clock = Arc::new(DefaultClock);

        Self {
            posting: JobPostingService::new(
                Arc::clone(&jobs),
                Arc::clone(&tasks),
                Arc::clone(&workers),
                Arc::clone(&clock),
            ),
            assignment: JobAssignmentService::new(
                jobs,
                Arc::clone(&tasks),
                Arc::clone(&workers),
                Arc::clone(&clock),
            ),
            workflow: TaskWorkflowService::new(tasks, clock),
            workers,
            company_id: CompanyId::new(),
            brief: None,
            decomposition: None,
            posted: None,
            last_assignment: None,
            last_transition: None,
        }
    }

    /// Returns the job brief under construction.
    ///
    /// # Errors
    ///
    /// Returns an error when no job has been described yet.
    pub fn brief_mut(&mut self) -> Result<&mut JobBrief, eyre::Report> {
        self.brief
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing job brief in scenario world"))
    }

    /// Builds a posting draft from the brief under construction.
    ///
    /// # Errors
    ///
    /// Returns an error when no job has been described yet.
    pub fn draft(&self) -> Result<JobDraft, eyre::Report> {
        let brief = self
            .brief
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing job brief in scenario world"))?;
        Ok(JobDraft::new(
            brief.title.clone(),
            brief.budget,
            Utc::now() + Duration::days(14),
            brief.complexity,
        )
        .with_description(brief.description.clone())
        .with_requirements(brief.requirements.clone())
        .with_skills(brief.skills.clone()))
    }

    /// Finds a stored task of the posted job by title.
    ///
    /// # Errors
    ///
    /// Returns an error when nothing was posted or no task has that title.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        let posted = self
            .posted
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no job has been posted in this scenario"))?;
        let tasks = run_async(self.posting.tasks_for_job(posted.job().id()))?;
        tasks
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))
    }
}

impl Default for MarketplaceWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts a job brief with no requirements or skills.
pub fn brief(title: String, budget: f64, complexity: Complexity) -> JobBrief {
    JobBrief {
        title,
        description: String::new(),
        requirements: Vec::new(),
        budget,
        skills: Vec::new(),
        complexity,
    }
}

/// Splits a comma-separated skill list.
pub fn skill_list(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MarketplaceWorld {
    MarketplaceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
