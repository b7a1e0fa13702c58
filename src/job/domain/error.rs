//! Error types for job domain validation and parsing.

use super::{JobId, JobStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating jobs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum JobDomainError {
    /// The job title is empty after trimming.
    #[error("job title must not be empty")]
    EmptyTitle,

    /// The budget is not a finite positive amount.
    #[error("invalid job budget {0}, expected a positive amount")]
    InvalidBudget(f64),

    /// The deadline is not after the posting time.
    #[error("job deadline {deadline} must be in the future")]
    DeadlineNotInFuture {
        /// The rejected deadline.
        deadline: DateTime<Utc>,
    },

    /// A requirement statement is empty after trimming.
    #[error("requirement {index} must not be blank")]
    BlankRequirement {
        /// Zero-based position of the blank requirement.
        index: usize,
    },

    /// The requested status transition is not allowed.
    #[error("job {job_id} cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Job whose transition was rejected.
        job_id: JobId,
        /// Current status.
        from: JobStatus,
        /// Requested status.
        to: JobStatus,
    },
}

/// Error returned while parsing complexity levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown complexity level: {0}")]
pub struct ParseComplexityError(pub String);

/// Error returned while parsing job statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);
