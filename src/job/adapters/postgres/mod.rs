//! `PostgreSQL` adapter for job persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresJobRepository;
