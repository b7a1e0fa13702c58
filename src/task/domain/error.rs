//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while mutating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The requested status transition is not allowed.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// Moving to `assigned` requires naming the assignee.
    #[error("task {0} must be assigned to a worker explicitly")]
    AssigneeRequired(TaskId),

    /// Deliverables can only be attached while work is in progress.
    #[error("task {task_id} does not accept deliverables while {status}")]
    DeliverableOutsideWork {
        /// Task that rejected the deliverable.
        task_id: TaskId,
        /// Current status.
        status: TaskStatus,
    },

    /// The deliverable reference is empty after trimming.
    #[error("deliverable must not be empty")]
    EmptyDeliverable,

    /// A task cannot depend on itself.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
