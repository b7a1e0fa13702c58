//! Port contracts for the worker roster.

pub mod directory;

pub use directory::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult};
