//! Application services for the task lifecycle after assignment.

mod workflow;

pub use workflow::{TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService};
