//! In-memory repository for job posting tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::job::{
    domain::{CompanyId, Job, JobId},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};

/// Thread-safe in-memory job repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    state: Arc<RwLock<InMemoryJobState>>,
}

#[derive(Debug, Default)]
struct InMemoryJobState {
    jobs: HashMap<JobId, Job>,
    company_index: HashMap<CompanyId, Vec<JobId>>,
}

impl InMemoryJobRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> JobRepositoryError {
    JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn store(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.jobs.contains_key(&job.id()) {
            return Err(JobRepositoryError::DuplicateJob(job.id()));
        }
        state
            .company_index
            .entry(job.company_id())
            .or_default()
            .push(job.id());
        state.jobs.insert(job.id(), job.clone());
        Ok(())
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<Job> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .jobs
            .get(&job.id())
            .ok_or(JobRepositoryError::NotFound(job.id()))?;
        if stored.revision() != job.revision() {
            return Err(JobRepositoryError::RevisionConflict {
                job_id: job.id(),
                expected: job.revision(),
                actual: stored.revision(),
            });
        }

        let updated = job.clone().with_revision(job.revision() + 1);
        state.jobs.insert(job.id(), updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.jobs.get(&id).cloned())
    }

    async fn find_by_company(&self, company_id: CompanyId) -> JobRepositoryResult<Vec<Job>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .company_index
            .get(&company_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.jobs.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}
