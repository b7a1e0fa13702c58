//! Assigning workers to tasks.
//!
//! [`AssignmentStrategy`] is the single entry point. Callers pick the
//! variant explicitly:
//!
//! - [`AssignmentStrategy::RoundRobinThreshold`] cycles through available
//!   workers sorted by rating and only commits a pairing when the exact
//!   skill match reaches the policy threshold.
//! - [`AssignmentStrategy::BestMatchScored`] scores every worker for every
//!   task and always takes the top scorer.

mod best_match;
mod round_robin;

use super::{SkillDemand, SkillMatch};
use crate::worker::domain::{CandidateQuery, WorkerCandidate, WorkerId};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Default minimum exact skill match for round-robin acceptance.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.30;

/// Errors returned by assignment strategies.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum AssignmentError {
    /// No worker passed the eligibility filter.
    #[error("no eligible workers for this job")]
    NoEligibleWorkers,

    /// The acceptance threshold lies outside `0.0..=1.0`.
    #[error("acceptance threshold must lie within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
}

/// Error returned while parsing a strategy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assignment strategy: {0}")]
pub struct ParseStrategyError(pub String);

/// When the round-robin cursor moves to the next worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorAdvance {
    /// Only after a worker accepts a task, so a rejected task is offered to
    /// the same worker's turn again for the next task.
    #[default]
    OnAcceptance,
    /// After every task, accepted or not.
    EveryTask,
}

impl TryFrom<&str> for CursorAdvance {
    type Error = ParseStrategyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "on_acceptance" | "on-acceptance" => Ok(Self::OnAcceptance),
            "every_task" | "every-task" => Ok(Self::EveryTask),
            _ => Err(ParseStrategyError(value.to_owned())),
        }
    }
}

/// Round-robin parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRobinPolicy {
    threshold: f64,
    cursor: CursorAdvance,
}

impl RoundRobinPolicy {
    /// Creates a policy with the given acceptance threshold.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::InvalidThreshold`] when `threshold` is not
    /// within `0.0..=1.0`.
    pub fn new(threshold: f64) -> Result<Self, AssignmentError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AssignmentError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            cursor: CursorAdvance::default(),
        })
    }

    /// Sets when the cursor advances.
    #[must_use]
    pub const fn with_cursor(mut self, cursor: CursorAdvance) -> Self {
        self.cursor = cursor;
        self
    }

    /// Returns the acceptance threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the cursor advance mode.
    #[must_use]
    pub const fn cursor(&self) -> CursorAdvance {
        self.cursor
    }
}

impl Default for RoundRobinPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            cursor: CursorAdvance::default(),
        }
    }
}

/// Best-match scoring weights.
///
/// A worker's score is the fuzzy skill-match fraction, plus the
/// availability bonus that applies, plus `experience_weight` per completed
/// task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Bonus for available workers.
    pub available_bonus: f64,
    /// Bonus for unavailable workers.
    pub unavailable_bonus: f64,
    /// Score added per completed task.
    pub experience_weight: f64,
}

impl ScoreWeights {
    /// Scores `worker` given its skill match.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "scores are weighted sums")]
    pub fn score(&self, worker: &WorkerCandidate, skill_match: SkillMatch) -> f64 {
        let availability = if worker.is_available() {
            self.available_bonus
        } else {
            self.unavailable_bonus
        };
        skill_match.fraction()
            + availability
            + self.experience_weight * f64::from(worker.completed_tasks())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            available_bonus: 1.0,
            unavailable_bonus: 0.5,
            experience_weight: 0.1,
        }
    }
}

/// How to match workers to tasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignmentStrategy {
    /// Round-robin over available, skill-relevant workers with an acceptance
    /// threshold.
    RoundRobinThreshold(RoundRobinPolicy),
    /// Best-scoring worker per task, no threshold.
    BestMatchScored(ScoreWeights),
}

impl AssignmentStrategy {
    /// Round-robin with the default policy.
    #[must_use]
    pub fn round_robin() -> Self {
        Self::RoundRobinThreshold(RoundRobinPolicy::default())
    }

    /// Best-match with the default weights.
    #[must_use]
    pub fn best_match() -> Self {
        Self::BestMatchScored(ScoreWeights::default())
    }

    /// Returns the short strategy name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RoundRobinThreshold(_) => "round-robin",
            Self::BestMatchScored(_) => "best-match",
        }
    }

    /// Returns the directory query that yields this strategy's roster for a
    /// job requiring `job_skills`.
    #[must_use]
    pub fn candidate_query(&self, job_skills: &[String]) -> CandidateQuery {
        match self {
            Self::RoundRobinThreshold(_) => CandidateQuery::available_with_any_skill(job_skills),
            Self::BestMatchScored(_) => CandidateQuery::workers(),
        }
    }

    /// Matches `tasks` to workers from `roster`.
    ///
    /// The roster may be wider than the strategy needs; each strategy applies
    /// its own eligibility filter. Task references in the plan are indexes
    /// into `tasks`.
    ///
    /// # Errors
    ///
    /// Round-robin returns [`AssignmentError::NoEligibleWorkers`] when no
    /// roster entry is an available worker sharing a job skill. Best-match
    /// never fails; tasks without candidates are reported as unassigned.
    pub fn assign<T: SkillDemand>(
        &self,
        job_skills: &[String],
        tasks: &[T],
        roster: &[WorkerCandidate],
    ) -> Result<AssignmentPlan, AssignmentError> {
        match self {
            Self::RoundRobinThreshold(policy) => {
                round_robin::assign(policy, job_skills, tasks, roster)
            }
            Self::BestMatchScored(weights) => Ok(best_match::assign(weights, tasks, roster)),
        }
    }
}

impl Default for AssignmentStrategy {
    fn default() -> Self {
        Self::round_robin()
    }
}

impl fmt::Display for AssignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for AssignmentStrategy {
    type Error = ParseStrategyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "round-robin" | "round_robin" => Ok(Self::round_robin()),
            "best-match" | "best_match" => Ok(Self::best_match()),
            _ => Err(ParseStrategyError(value.to_owned())),
        }
    }
}

/// One accepted task-to-worker pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    task_index: usize,
    worker_id: WorkerId,
    worker_name: String,
    skill_match: SkillMatch,
}

impl AssignmentRecord {
    fn new(task_index: usize, worker: &WorkerCandidate, skill_match: SkillMatch) -> Self {
        Self {
            task_index,
            worker_id: worker.id(),
            worker_name: worker.name().to_owned(),
            skill_match,
        }
    }

    /// Returns the index of the task in the input slice.
    #[must_use]
    pub const fn task_index(&self) -> usize {
        self.task_index
    }

    /// Returns the chosen worker.
    #[must_use]
    pub const fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    /// Returns the chosen worker's display name.
    #[must_use]
    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }

    /// Returns the skill match that justified the pairing.
    #[must_use]
    pub const fn skill_match(&self) -> SkillMatch {
        self.skill_match
    }
}

/// Why a task was left pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnassignedReason {
    /// The worker whose turn it was covered too few skills.
    BelowThreshold {
        /// Worker that was offered the task.
        worker_id: WorkerId,
        /// Their skill match.
        skill_match: SkillMatch,
    },
    /// The task declares no skills, so no match can be computed.
    DegenerateSkillSet,
    /// The roster held no eligible worker.
    NoCandidate,
}

/// A task left pending by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnassignedTask {
    /// Index of the task in the input slice.
    pub task_index: usize,
    /// Why it stayed pending.
    #[serde(flatten)]
    pub reason: UnassignedReason,
}

/// Result of running a strategy: every input task appears exactly once,
/// either as an assignment or as unassigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentPlan {
    assignments: Vec<AssignmentRecord>,
    unassigned: Vec<UnassignedTask>,
}

impl AssignmentPlan {
    fn accept(&mut self, task_index: usize, worker: &WorkerCandidate, skill_match: SkillMatch) {
        self.assignments
            .push(AssignmentRecord::new(task_index, worker, skill_match));
    }

    fn leave(&mut self, task_index: usize, reason: UnassignedReason) {
        self.unassigned.push(UnassignedTask { task_index, reason });
    }

    /// Returns accepted pairings in task order.
    #[must_use]
    pub fn assignments(&self) -> &[AssignmentRecord] {
        &self.assignments
    }

    /// Returns tasks left pending in task order.
    #[must_use]
    pub fn unassigned(&self) -> &[UnassignedTask] {
        &self.unassigned
    }

    /// Returns the assigned workers without repeats, in first-assignment
    /// order.
    #[must_use]
    pub fn assignees(&self) -> Vec<WorkerId> {
        let mut assignees = Vec::new();
        for record in &self.assignments {
            if !assignees.contains(&record.worker_id) {
                assignees.push(record.worker_id);
            }
        }
        assignees
    }

    /// Returns whether nothing was assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
