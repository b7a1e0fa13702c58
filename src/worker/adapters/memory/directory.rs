//! In-memory worker directory for tests and the planning CLI.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::worker::{
    domain::{CandidateQuery, WorkerCandidate, WorkerId},
    ports::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult},
};

/// Thread-safe in-memory roster that preserves registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkerDirectory {
    workers: Arc<RwLock<Vec<WorkerCandidate>>>,
}

impl InMemoryWorkerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory seeded with `workers`, keeping their order.
    #[must_use]
    pub fn with_workers(workers: impl IntoIterator<Item = WorkerCandidate>) -> Self {
        Self {
            workers: Arc::new(RwLock::new(workers.into_iter().collect())),
        }
    }
}

fn poisoned(err: impl ToString) -> WorkerDirectoryError {
    WorkerDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WorkerDirectory for InMemoryWorkerDirectory {
    async fn register(&self, worker: &WorkerCandidate) -> WorkerDirectoryResult<()> {
        let mut workers = self.workers.write().map_err(poisoned)?;
        if workers.iter().any(|existing| existing.id() == worker.id()) {
            return Err(WorkerDirectoryError::DuplicateWorker(worker.id()));
        }
        workers.push(worker.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkerId) -> WorkerDirectoryResult<Option<WorkerCandidate>> {
        let workers = self.workers.read().map_err(poisoned)?;
        Ok(workers.iter().find(|worker| worker.id() == id).cloned())
    }

    async fn find_candidates(
        &self,
        query: &CandidateQuery,
    ) -> WorkerDirectoryResult<Vec<WorkerCandidate>> {
        let workers = self.workers.read().map_err(poisoned)?;
        Ok(workers
            .iter()
            .filter(|worker| query.matches(worker))
            .cloned()
            .collect())
    }
}
