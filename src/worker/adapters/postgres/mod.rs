//! `PostgreSQL` adapter for the worker directory.

mod models;
mod repository;
mod schema;

pub use repository::PostgresWorkerDirectory;
