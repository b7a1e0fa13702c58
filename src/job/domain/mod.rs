//! Domain model for posted jobs.
//!
//! Jobs are owned by the posting company and become immutable once their
//! tasks have been generated, apart from lifecycle status, the assigned
//! worker list, and the optimistic revision counter.

mod brief;
mod complexity;
mod error;
mod ids;
mod job;
mod status;

pub use brief::JobBrief;
pub use complexity::Complexity;
pub use error::{JobDomainError, ParseComplexityError, ParseJobStatusError};
pub use ids::{CompanyId, JobId};
pub use job::{Job, JobDraft, PersistedJobData};
pub use status::JobStatus;
