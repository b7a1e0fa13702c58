//! Identity-less decomposition output.

use super::Priority;
use serde::{Deserialize, Serialize};

/// A budgeted, skill-tagged unit of work produced by job decomposition.
///
/// A micro-task has no identity until it is persisted as a
/// [`super::Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroTask {
    /// Short task title.
    pub title: String,
    /// What the worker is asked to do.
    pub description: String,
    /// Estimated effort in hours; always positive.
    pub estimated_hours: f64,
    /// Share of the job budget.
    pub budget: f64,
    /// Required skill tags, deduplicated.
    pub skills: Vec<String>,
    /// Urgency.
    pub priority: Priority,
}
