//! Worker candidate value used as assignment input.

use super::{WorkerDomainError, WorkerId, WorkerRole};
use serde::{Deserialize, Serialize};

/// Highest rating a worker can hold.
const MAX_RATING: f64 = 5.0;

/// A worker as seen by the assignment engine.
///
/// Candidates are read-only inputs: assignment reads skills, availability,
/// rating, and experience but never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CandidateRecord")]
pub struct WorkerCandidate {
    id: WorkerId,
    name: String,
    role: WorkerRole,
    skills: Vec<String>,
    available: bool,
    rating: f64,
    completed_tasks: u32,
}

/// Parameter object for reconstructing a persisted worker candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedWorkerData {
    /// Persisted worker identifier.
    pub id: WorkerId,
    /// Persisted display name.
    pub name: String,
    /// Persisted account role.
    pub role: WorkerRole,
    /// Persisted skill tags.
    pub skills: Vec<String>,
    /// Persisted availability flag.
    pub available: bool,
    /// Persisted rating.
    pub rating: f64,
    /// Persisted count of completed tasks.
    pub completed_tasks: u32,
}

impl WorkerCandidate {
    /// Creates an available, unrated candidate with no skills.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerDomainError::EmptyName`] when the name is blank.
    pub fn new(name: impl Into<String>, role: WorkerRole) -> Result<Self, WorkerDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WorkerDomainError::EmptyName);
        }
        Ok(Self {
            id: WorkerId::new(),
            name: trimmed.to_owned(),
            role,
            skills: Vec::new(),
            available: true,
            rating: 0.0,
            completed_tasks: 0,
        })
    }

    /// Reconstructs a candidate from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkerData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            role: data.role,
            skills: data.skills,
            available: data.available,
            rating: data.rating,
            completed_tasks: data.completed_tasks,
        }
    }

    /// Sets the skill tags, dropping blank entries.
    #[must_use]
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.skills = skills
            .into_iter()
            .map(|skill| skill.trim().to_owned())
            .filter(|skill| !skill.is_empty())
            .collect();
        self
    }

    /// Sets the availability flag.
    #[must_use]
    pub const fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the rating.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerDomainError::InvalidRating`] when the rating is not
    /// finite or falls outside `0..=5`.
    pub fn with_rating(mut self, rating: f64) -> Result<Self, WorkerDomainError> {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(WorkerDomainError::InvalidRating(rating));
        }
        self.rating = rating;
        Ok(self)
    }

    /// Sets the number of tasks the worker has completed.
    #[must_use]
    pub const fn with_completed_tasks(mut self, completed_tasks: u32) -> Self {
        self.completed_tasks = completed_tasks;
        self
    }

    /// Returns the worker identifier.
    #[must_use]
    pub const fn id(&self) -> WorkerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> WorkerRole {
        self.role
    }

    /// Returns the skill tags.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Returns whether the worker currently accepts work.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the rating.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub const fn completed_tasks(&self) -> u32 {
        self.completed_tasks
    }

    /// Returns whether the account has the worker role.
    #[must_use]
    pub fn is_worker(&self) -> bool {
        self.role == WorkerRole::Worker
    }

    /// Returns whether any skill tag is exactly equal to one of `skills`.
    #[must_use]
    pub fn shares_skill_with(&self, skills: &[String]) -> bool {
        self.skills.iter().any(|own| skills.contains(own))
    }
}

/// Wire shape accepted when deserializing candidates from JSON rosters.
#[derive(Deserialize)]
struct CandidateRecord {
    #[serde(default)]
    id: Option<WorkerId>,
    name: String,
    #[serde(default)]
    role: WorkerRole,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default = "default_available")]
    available: bool,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    completed_tasks: u32,
}

const fn default_available() -> bool {
    true
}

impl TryFrom<CandidateRecord> for WorkerCandidate {
    type Error = WorkerDomainError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        let mut candidate = Self::new(record.name, record.role)?
            .with_skills(record.skills)
            .with_availability(record.available)
            .with_completed_tasks(record.completed_tasks)
            .with_rating(record.rating)?;
        if let Some(id) = record.id {
            candidate.id = id;
        }
        Ok(candidate)
    }
}
