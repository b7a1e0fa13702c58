//! Domain model for worker candidates.

mod candidate;
mod error;
mod ids;
mod query;
mod role;

pub use candidate::{PersistedWorkerData, WorkerCandidate};
pub use error::{ParseWorkerRoleError, WorkerDomainError};
pub use ids::WorkerId;
pub use query::CandidateQuery;
pub use role::WorkerRole;
