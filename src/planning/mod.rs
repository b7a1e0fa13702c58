//! Job decomposition and worker assignment.
//!
//! Everything here is a pure function over explicit inputs: no clock, no
//! randomness, no persistence. Services in [`crate::job`] load the inputs
//! and persist the outputs.
//!
//! - [`JobDecomposer`] turns a [`crate::job::domain::JobBrief`] into an
//!   ordered list of [`crate::task::domain::MicroTask`]s.
//! - [`AssignmentStrategy`] matches tasks to a worker roster, either by
//!   round-robin with an acceptance threshold or by best-match scoring.

pub mod assignment;
mod decomposer;
mod keywords;
mod skill_match;

pub use assignment::{
    AssignmentError, AssignmentPlan, AssignmentRecord, AssignmentStrategy, CursorAdvance,
    ParseStrategyError, RoundRobinPolicy, ScoreWeights, UnassignedReason, UnassignedTask,
};
pub use decomposer::{DecompositionError, JobDecomposer, MAX_TASK_HOURS, TaskTextTemplates};
pub use skill_match::{SkillDemand, SkillMatch};
