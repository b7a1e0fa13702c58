//! Service layer for assigning workers to a job's pending tasks.

use crate::job::{
    domain::{Job, JobDomainError, JobId, JobStatus},
    ports::{JobRepository, JobRepositoryError},
};
use crate::planning::{AssignmentError, AssignmentStrategy};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::worker::{
    domain::WorkerId,
    ports::{WorkerDirectory, WorkerDirectoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// One committed task assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskAssignment {
    /// Assigned task.
    pub task_id: TaskId,
    /// Chosen worker.
    pub worker_id: WorkerId,
    /// Chosen worker's display name.
    pub worker_name: String,
    /// Rounded skill match, for example `"67%"`.
    pub skill_match: String,
}

/// Outcome of a job-level assignment run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentReport {
    job: Job,
    strategy: &'static str,
    assignments: Vec<TaskAssignment>,
    pending: Vec<TaskId>,
    contended: Vec<TaskId>,
}

impl AssignmentReport {
    /// Returns the job as stored after the run.
    #[must_use]
    pub const fn job(&self) -> &Job {
        &self.job
    }

    /// Returns the name of the strategy that produced the report.
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        self.strategy
    }

    /// Returns the committed assignments in task order.
    #[must_use]
    pub fn assignments(&self) -> &[TaskAssignment] {
        &self.assignments
    }

    /// Returns the tasks that are still pending.
    #[must_use]
    pub fn pending(&self) -> &[TaskId] {
        &self.pending
    }

    /// Returns the planned tasks that a concurrent run assigned first.
    #[must_use]
    pub fn contended(&self) -> &[TaskId] {
        &self.contended
    }
}

/// Service-level errors for job assignment.
#[derive(Debug, Error)]
pub enum JobAssignmentError {
    /// The job does not exist.
    #[error("job not found: {0}")]
    NotFound(JobId),
    /// The job no longer accepts assignments.
    #[error("job {job_id} is {status} and cannot take assignments")]
    JobClosed {
        /// Rejected job.
        job_id: JobId,
        /// Its current status.
        status: JobStatus,
    },
    /// The strategy could not produce a plan.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    /// The job rejected the status change.
    #[error(transparent)]
    Job(#[from] JobDomainError),
    /// A task rejected its assignment.
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
    /// The plan named a task outside the pending batch it was built from.
    #[error("assignment plan refers to task index {0} outside the pending batch")]
    PlanOutOfRange(usize),
}

/// Attempts at merging assignees into the job before a revision conflict is
/// returned to the caller.
const JOB_MERGE_ATTEMPTS: usize = 3;

/// Looks up the pending task a plan entry refers to.
pub(crate) fn planned_task(pending: &[Task], task_index: usize) -> JobAssignmentResult<&Task> {
    pending
        .get(task_index)
        .ok_or(JobAssignmentError::PlanOutOfRange(task_index))
}

/// Result type for job assignment operations.
pub type JobAssignmentResult<T> = Result<T, JobAssignmentError>;

/// Job-level assignment orchestration service.
#[derive(Clone)]
pub struct JobAssignmentService<J, T, W, C>
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
}

impl<J, T, W, C> JobAssignmentService<J, T, W, C>
where
    J: JobRepository,
    T: TaskRepository,
    W: WorkerDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(jobs: Arc<J>, tasks: Arc<T>, workers: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            jobs,
            tasks,
            workers,
            clock,
        }
    }

    /// Matches workers to the pending tasks of `job_id` using `strategy`.
    ///
    /// Each accepted task is written with a compare-and-set on `pending`. A
    /// task another run assigned first is reported as contended and its
    /// worker is not recorded. The workers whose tasks were written are then
    /// merged into the job under its revision guard, re-reading the job when
    /// a concurrent run moved the revision on. The job moves to in-progress
    /// even when nothing was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`JobAssignmentError::NotFound`] for an unknown job,
    /// [`JobAssignmentError::JobClosed`] for a completed or cancelled job,
    /// [`JobAssignmentError::Assignment`] when the strategy finds no eligible
    /// workers (nothing is written in that case), and
    /// [`JobAssignmentError::JobRepository`] with
    /// [`JobRepositoryError::RevisionConflict`] when the job kept changing
    /// underneath the merge.
    pub async fn assign_workers(
        &self,
        job_id: JobId,
        strategy: &AssignmentStrategy,
    ) -> JobAssignmentResult<AssignmentReport> {
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .ok_or(JobAssignmentError::NotFound(job_id))?;
        if !job.status().accepts_assignments() {
            return Err(JobAssignmentError::JobClosed {
                job_id,
                status: job.status(),
            });
        }

        let pending_tasks = self.tasks.find_pending_by_job(job_id).await?;
        let roster = self
            .workers
            .find_candidates(&strategy.candidate_query(job.skills()))
            .await?;
        let plan = strategy
            .assign(job.skills(), &pending_tasks, &roster)
            .inspect_err(|err| {
                tracing::warn!(job_id = %job_id, strategy = %strategy, error = %err, "assignment rejected");
            })?;

        let mut staged = Vec::with_capacity(plan.assignments().len());
        for record in plan.assignments() {
            let mut task = planned_task(&pending_tasks, record.task_index())?.clone();
            task.assign_to(record.worker_id(), &*self.clock)?;
            staged.push((record, task));
        }
        let pending = plan
            .unassigned()
            .iter()
            .map(|unassigned| planned_task(&pending_tasks, unassigned.task_index).map(Task::id))
            .collect::<JobAssignmentResult<Vec<TaskId>>>()?;

        let mut assignments = Vec::with_capacity(staged.len());
        let mut contended = Vec::new();
        let mut write_failure = None;
        for (record, task) in staged {
            match self.tasks.update(&task, TaskStatus::Pending).await {
                Ok(()) => assignments.push(TaskAssignment {
                    task_id: task.id(),
                    worker_id: record.worker_id(),
                    worker_name: record.worker_name().to_owned(),
                    skill_match: record.skill_match().percent_label(),
                }),
                Err(TaskRepositoryError::StatusConflict { task_id, actual, .. }) => {
                    tracing::debug!(job_id = %job_id, task_id = %task_id, status = %actual, "task already taken");
                    contended.push(task_id);
                }
                Err(err) => {
                    write_failure = Some(err);
                    break;
                }
            }
        }

        let mut committed: Vec<WorkerId> = Vec::new();
        for assignment in &assignments {
            if !committed.contains(&assignment.worker_id) {
                committed.push(assignment.worker_id);
            }
        }
        let merged = self.merge_assignees(job, &committed).await;
        if let Some(err) = write_failure {
            tracing::warn!(
                job_id = %job_id,
                assigned = assignments.len(),
                error = %err,
                "task write failed part-way through assignment"
            );
            return Err(err.into());
        }
        let stored_job = merged?;

        tracing::info!(
            job_id = %job_id,
            strategy = %strategy,
            assigned = assignments.len(),
            pending = pending.len(),
            contended = contended.len(),
            revision = stored_job.revision(),
            "workers assigned"
        );
        Ok(AssignmentReport {
            job: stored_job,
            strategy: strategy.name(),
            assignments,
            pending,
            contended,
        })
    }

    /// Records `assignees` on the job and moves it to in-progress.
    async fn merge_assignees(&self, mut job: Job, assignees: &[WorkerId]) -> JobAssignmentResult<Job> {
        for _ in 1..JOB_MERGE_ATTEMPTS {
            job.begin_work(assignees.iter().copied(), &*self.clock)?;
            match self.jobs.update(&job).await {
                Err(JobRepositoryError::RevisionConflict { job_id, actual, .. }) => {
                    tracing::debug!(job_id = %job_id, revision = actual, "job changed, merging again");
                    job = self
                        .jobs
                        .find_by_id(job_id)
                        .await?
                        .ok_or(JobAssignmentError::NotFound(job_id))?;
                }
                result => return Ok(result?),
            }
        }
        job.begin_work(assignees.iter().copied(), &*self.clock)?;
        Ok(self.jobs.update(&job).await?)
    }
}
