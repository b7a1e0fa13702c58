//! Repository port for task persistence and lookup.

use crate::job::domain::JobId;
use crate::task::domain::{Task, TaskId, TaskStatus};
use crate::worker::domain::WorkerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a batch of new tasks atomically.
    ///
    /// Either every task is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when any task ID already
    /// exists.
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task whose stored status is
    /// `expected_status`.
    ///
    /// The status acts as a compare-and-set guard so two writers cannot both
    /// move the same task out of `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::StatusConflict`] when the stored status
    /// differs from `expected_status`.
    async fn update(&self, task: &Task, expected_status: TaskStatus) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task of a job ordered by position.
    async fn find_by_job(&self, job_id: JobId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the pending tasks of a job ordered by position.
    async fn find_pending_by_job(&self, job_id: JobId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks assigned to a worker, ordered by job and position.
    async fn find_by_assignee(&self, worker_id: WorkerId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status did not match the caller's expectation.
    #[error("task {task_id} is {actual}, expected {expected}")]
    StatusConflict {
        /// Task whose update was rejected.
        task_id: TaskId,
        /// Status the caller expected.
        expected: TaskStatus,
        /// Status currently stored.
        actual: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
