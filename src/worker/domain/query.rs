//! Roster filters used when fetching assignment candidates.

use super::{WorkerCandidate, WorkerRole};

/// Filter applied by a [`crate::worker::ports::WorkerDirectory`] lookup.
///
/// An empty `any_of_skills` list disables skill filtering; otherwise a
/// candidate must hold at least one of the listed tags exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    role: WorkerRole,
    available_only: bool,
    any_of_skills: Vec<String>,
}

impl CandidateQuery {
    /// Matches every account with the worker role.
    #[must_use]
    pub const fn workers() -> Self {
        Self {
            role: WorkerRole::Worker,
            available_only: false,
            any_of_skills: Vec::new(),
        }
    }

    /// Matches available workers holding at least one of `skills`.
    #[must_use]
    pub fn available_with_any_skill(skills: &[String]) -> Self {
        Self {
            role: WorkerRole::Worker,
            available_only: true,
            any_of_skills: skills.to_vec(),
        }
    }

    /// Returns the required role.
    #[must_use]
    pub const fn role(&self) -> WorkerRole {
        self.role
    }

    /// Returns whether unavailable workers are excluded.
    #[must_use]
    pub const fn available_only(&self) -> bool {
        self.available_only
    }

    /// Returns the skill tags of which a candidate must hold at least one.
    #[must_use]
    pub fn any_of_skills(&self) -> &[String] {
        &self.any_of_skills
    }

    /// Returns whether `candidate` passes this filter.
    #[must_use]
    pub fn matches(&self, candidate: &WorkerCandidate) -> bool {
        candidate.role() == self.role
            && (!self.available_only || candidate.is_available())
            && (self.any_of_skills.is_empty() || candidate.shares_skill_with(&self.any_of_skills))
    }
}
