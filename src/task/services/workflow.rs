//! Service layer for driving assigned tasks through to review.

use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::worker::domain::WorkerId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskWorkflowService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Moves a task to `target`.
    ///
    /// The write is guarded by the status the task was loaded with, so a
    /// concurrent transition surfaces as
    /// [`TaskRepositoryError::StatusConflict`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task,
    /// [`TaskWorkflowError::Domain`] when the lifecycle forbids the move, or
    /// [`TaskWorkflowError::Repository`] when persistence fails.
    pub async fn transition(&self, task_id: TaskId, target: TaskStatus) -> TaskWorkflowResult<Task> {
        let mut task = self.load(task_id).await?;
        let previous = task.status();
        task.transition_to(target, &*self.clock)?;
        self.repository.update(&task, previous).await?;
        tracing::info!(
            task_id = %task_id,
            from = %previous,
            to = %target,
            "task status changed"
        );
        Ok(task)
    }

    /// Attaches a deliverable reference to an in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task,
    /// [`TaskWorkflowError::Domain`] when the task is not in progress or the
    /// reference is blank, or [`TaskWorkflowError::Repository`] when
    /// persistence fails.
    pub async fn add_deliverable(
        &self,
        task_id: TaskId,
        deliverable: impl Into<String> + Send,
    ) -> TaskWorkflowResult<Task> {
        let mut task = self.load(task_id).await?;
        task.add_deliverable(deliverable, &*self.clock)?;
        self.repository.update(&task, task.status()).await?;
        tracing::debug!(
            task_id = %task_id,
            deliverables = task.deliverables().len(),
            "deliverable attached"
        );
        Ok(task)
    }

    /// Returns the tasks assigned to `worker_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn tasks_for_worker(&self, worker_id: WorkerId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.repository.find_by_assignee(worker_id).await?)
    }

    async fn load(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(task_id))
    }
}
