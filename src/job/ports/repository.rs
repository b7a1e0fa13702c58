//! Repository port for job persistence and lookup.

use crate::job::domain::{CompanyId, Job, JobId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job repository operations.
pub type JobRepositoryResult<T> = Result<T, JobRepositoryError>;

/// Job persistence contract.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Stores a newly posted job.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::DuplicateJob`] when the job ID already
    /// exists.
    async fn store(&self, job: &Job) -> JobRepositoryResult<()>;

    /// Persists changes to an existing job under optimistic concurrency.
    ///
    /// The write succeeds only when the stored revision equals
    /// [`Job::revision`]; the stored copy then carries the next revision and
    /// is returned. Callers must use the returned job for further updates.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not exist
    /// or [`JobRepositoryError::RevisionConflict`] when another writer
    /// updated it first.
    async fn update(&self, job: &Job) -> JobRepositoryResult<Job>;

    /// Finds a job by identifier.
    ///
    /// Returns `None` when the job does not exist.
    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>>;

    /// Returns the jobs posted by a company, oldest first.
    async fn find_by_company(&self, company_id: CompanyId) -> JobRepositoryResult<Vec<Job>>;
}

/// Errors returned by job repository implementations.
#[derive(Debug, Clone, Error)]
pub enum JobRepositoryError {
    /// A job with the same identifier already exists.
    #[error("duplicate job identifier: {0}")]
    DuplicateJob(JobId),

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// The job was modified since it was loaded.
    #[error("job {job_id} was modified concurrently: expected revision {expected}, found {actual}")]
    RevisionConflict {
        /// Job whose update was rejected.
        job_id: JobId,
        /// Revision the caller loaded.
        expected: u64,
        /// Revision currently stored.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
