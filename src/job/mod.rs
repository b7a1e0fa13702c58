//! Job posting and job-level worker assignment.
//!
//! A company posts a job; the posting service decomposes it into micro-tasks
//! and persists them, and the assignment service later matches workers to
//! the job's pending tasks. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
