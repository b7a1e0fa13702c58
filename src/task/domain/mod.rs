//! Domain model for micro-tasks.
//!
//! [`MicroTask`] is the identity-less output of decomposition; [`Task`] is
//! the persisted aggregate that carries lifecycle status and assignment.

mod error;
mod ids;
mod micro_task;
mod priority;
mod status;
mod task;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use micro_task::MicroTask;
pub use priority::Priority;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
