//! Directory port for worker registration and candidate lookup.

use crate::worker::domain::{CandidateQuery, WorkerCandidate, WorkerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for worker directory operations.
pub type WorkerDirectoryResult<T> = Result<T, WorkerDirectoryError>;

/// Worker roster contract.
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    /// Adds a worker to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerDirectoryError::DuplicateWorker`] when the identifier
    /// is already registered.
    async fn register(&self, worker: &WorkerCandidate) -> WorkerDirectoryResult<()>;

    /// Finds a worker by identifier.
    ///
    /// Returns `None` when the worker does not exist.
    async fn find_by_id(&self, id: WorkerId) -> WorkerDirectoryResult<Option<WorkerCandidate>>;

    /// Returns every worker matching `query`, in registration order.
    ///
    /// Registration order is the tie-breaker for assignment strategies, so
    /// implementations must keep it stable across calls.
    async fn find_candidates(
        &self,
        query: &CandidateQuery,
    ) -> WorkerDirectoryResult<Vec<WorkerCandidate>>;
}

/// Errors returned by worker directory implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkerDirectoryError {
    /// A worker with the same identifier already exists.
    #[error("duplicate worker identifier: {0}")]
    DuplicateWorker(WorkerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkerDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
