//! Error types for worker domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing worker domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkerDomainError {
    /// The worker display name is empty after trimming.
    #[error("worker name must not be empty")]
    EmptyName,

    /// The rating is not a finite value within the accepted range.
    #[error("invalid worker rating {0}, expected a value between 0 and 5")]
    InvalidRating(f64),
}

/// Error returned while parsing worker roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown worker role: {0}")]
pub struct ParseWorkerRoleError(pub String);
