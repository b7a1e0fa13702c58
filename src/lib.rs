//! Gigboard: micro-task marketplace core.
//!
//! Companies post jobs; the crate decomposes each job into budgeted,
//! skill-tagged micro-tasks and assigns workers to them.
//!
//! # Architecture
//!
//! Gigboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`planning`]: Job decomposition and assignment strategies
//! - [`job`]: Job posting and job-level assignment
//! - [`task`]: Micro-task lifecycle tracking
//! - [`worker`]: Worker roster and candidate lookup
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Logging setup for binaries

pub mod config;
pub mod job;
pub mod pg;
pub mod planning;
pub mod task;
pub mod telemetry;
pub mod worker;
