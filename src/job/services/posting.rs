//! Service layer for posting jobs and generating their tasks.

use crate::job::{
    domain::{CompanyId, Job, JobDomainError, JobDraft, JobId},
    ports::{JobRepository, JobRepositoryError},
};
use crate::planning::{
    AssignmentError, AssignmentStrategy, DecompositionError, JobDecomposer, ScoreWeights,
};
use crate::task::{
    domain::{Task, TaskDomainError},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::worker::{
    domain::CandidateQuery,
    ports::{WorkerDirectory, WorkerDirectoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for posting a job on behalf of a company.
#[derive(Debug, Clone, PartialEq)]
pub struct PostJobRequest {
    company_id: CompanyId,
    draft: JobDraft,
}

impl PostJobRequest {
    /// Creates a posting request.
    #[must_use]
    pub const fn new(company_id: CompanyId, draft: JobDraft) -> Self {
        Self { company_id, draft }
    }
}

/// A freshly posted job with its generated tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedJob {
    job: Job,
    tasks: Vec<Task>,
}

impl PostedJob {
    /// Returns the stored job.
    #[must_use]
    pub const fn job(&self) -> &Job {
        &self.job
    }

    /// Returns the stored tasks in decomposition order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Splits the result into job and tasks.
    #[must_use]
    pub fn into_parts(self) -> (Job, Vec<Task>) {
        (self.job, self.tasks)
    }
}

/// Service-level errors for job posting.
#[derive(Debug, Error)]
pub enum JobPostingError {
    /// Job validation failed.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// The job could not be decomposed.
    #[error(transparent)]
    Decomposition(#[from] DecompositionError),
    /// Auto-assignment could not run.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    /// A generated task rejected its assignment.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// Job persistence failed.
    #[error(transparent)]
    JobRepository(#[from] JobRepositoryError),
    /// Task persistence failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Worker lookup failed.
    #[error(transparent)]
    Directory(#[from] WorkerDirectoryError),
}

/// Result type for job posting operations.
pub type JobPostingResult<T> = Result<T, JobPostingError>;

/// Job posting orchestration service.
#[derive(Clone)]
pub struct JobPostingService<J, T, W, C>
where
    J: JobRepository,
    T: TaskRepository,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    jobs: Arc<J>,
    tasks: Arc<T>,
    workers: Arc<W>,
    clock: Arc<C>,
    decomposer: JobDecomposer,
    auto_assignment: Option<ScoreWeights>,
}

impl<J, T, W, C> JobPostingService<J, T, W, C>
where
    J: JobRepository,
    T: TaskRepository,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a posting service with the default decomposer and no
    /// auto-assignment.
    #[must_use]
    pub fn new(jobs: Arc<J>, tasks: Arc<T>, workers: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            jobs,
            tasks,
            workers,
            clock,
            decomposer: JobDecomposer::new(),
            auto_assignment: None,
        }
    }

    /// Replaces the decomposer.
    #[must_use]
    pub fn with_decomposer(mut self, decomposer: JobDecomposer) -> Self {
        self.decomposer = decomposer;
        self
    }

    /// Assigns freshly generated tasks by best-match scoring with `weights`.
    #[must_use]
    pub const fn with_auto_assignment(mut self, weights: ScoreWeights) -> Self {
        self.auto_assignment = Some(weights);
        self
    }

    /// Validates, decomposes, and stores a job with its tasks.
    ///
    /// With auto-assignment enabled, every task goes to its best-scoring
    /// worker and the job moves to in-progress when at least one task was
    /// assigned.
    ///
    /// # Errors
    ///
    /// Returns [`JobPostingError::Domain`] for an invalid draft,
    /// [`JobPostingError::Decomposition`] when decomposition fails, or a
    /// repository variant when persistence fails.
    pub async fn post_job(&self, request: PostJobRequest) -> JobPostingResult<PostedJob> {
        let PostJobRequest { company_id, draft } = request;
        let mut job = Job::post(company_id, draft, &*self.clock)?;
        let micro_tasks = self.decomposer.decompose(&job.brief())?;

        let mut tasks = Vec::with_capacity(micro_tasks.len());
        for (position, micro_task) in (0_u32..).zip(micro_tasks) {
            tasks.push(Task::from_micro_task(
                job.id(),
                position,
                job.deadline(),
                micro_task,
                &*self.clock,
            ));
        }

        if let Some(weights) = self.auto_assignment {
            self.auto_assign(&mut job, &mut tasks, weights).await?;
        }

        self.jobs.store(&job).await?;
        self.tasks.store_all(&tasks).await?;
        tracing::info!(
            job_id = %job.id(),
            company_id = %company_id,
            tasks = tasks.len(),
            status = %job.status(),
            "job posted"
        );
        Ok(PostedJob { job, tasks })
    }

    async fn auto_assign(
        &self,
        job: &mut Job,
        tasks: &mut [Task],
        weights: ScoreWeights,
    ) -> JobPostingResult<()> {
        let roster = self
            .workers
            .find_candidates(&CandidateQuery::workers())
            .await?;
        let plan = AssignmentStrategy::BestMatchScored(weights).assign(job.skills(), tasks, &roster)?;
        for record in plan.assignments() {
            if let Some(task) = tasks.get_mut(record.task_index()) {
                task.assign_to(record.worker_id(), &*self.clock)?;
            }
        }
        if !plan.is_empty() {
            job.begin_work(plan.assignees(), &*self.clock)?;
        }
        tracing::debug!(
            job_id = %job.id(),
            assigned = plan.assignments().len(),
            unassigned = plan.unassigned().len(),
            "auto-assignment applied"
        );
        Ok(())
    }

    /// Retrieves a job by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`JobPostingError::JobRepository`] when lookup fails.
    pub async fn find_job(&self, job_id: JobId) -> JobPostingResult<Option<Job>> {
        Ok(self.jobs.find_by_id(job_id).await?)
    }

    /// Returns the tasks of a job in decomposition order.
    ///
    /// # Errors
    ///
    /// Returns [`JobPostingError::TaskRepository`] when lookup fails.
    pub async fn tasks_for_job(&self, job_id: JobId) -> JobPostingResult<Vec<Task>> {
        Ok(self.tasks.find_by_job(job_id).await?)
    }

    /// Returns the jobs posted by a company, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`JobPostingError::JobRepository`] when lookup fails.
    pub async fn jobs_for_company(&self, company_id: CompanyId) -> JobPostingResult<Vec<Job>> {
        Ok(self.jobs.find_by_company(company_id).await?)
    }
}
