//! Decomposition input derived from a job.

use super::Complexity;
use serde::{Deserialize, Serialize};

/// The parts of a job that drive decomposition into micro-tasks.
///
/// Fields are public so callers outside the job store (the planning CLI,
/// tests) can build briefs directly; the decomposer validates the budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobBrief {
    /// Job title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Ordered requirement statements.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Total budget.
    pub budget: f64,
    /// Skill tags declared by the company.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Declared complexity.
    pub complexity: Complexity,
}
