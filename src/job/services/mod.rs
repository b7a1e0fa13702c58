//! Application services for posting jobs and assigning their tasks.

mod assignment;
mod posting;

pub use assignment::{
    AssignmentReport, JobAssignmentError, JobAssignmentResult, JobAssignmentService,
    TaskAssignment,
};
pub(crate) use assignment::planned_task;
pub use posting::{
    JobPostingError, JobPostingResult, JobPostingService, PostJobRequest, PostedJob,
};
