//! Job aggregate root.

use super::{CompanyId, Complexity, JobBrief, JobDomainError, JobId, JobStatus};
use crate::worker::domain::WorkerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Company-supplied job details awaiting validation.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    title: String,
    description: String,
    requirements: Vec<String>,
    budget: f64,
    deadline: DateTime<Utc>,
    skills: Vec<String>,
    complexity: Complexity,
}

impl JobDraft {
    /// Creates a draft with the mandatory fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        budget: f64,
        deadline: DateTime<Utc>,
        complexity: Complexity,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            requirements: Vec::new(),
            budget,
            deadline,
            skills: Vec::new(),
            complexity,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the ordered requirement statements.
    #[must_use]
    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = String>) -> Self {
        self.requirements = requirements.into_iter().collect();
        self
    }

    /// Sets the required skill tags.
    #[must_use]
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }
}

/// Job aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    company_id: CompanyId,
    title: String,
    description: String,
    requirements: Vec<String>,
    budget: f64,
    deadline: DateTime<Utc>,
    skills: Vec<String>,
    complexity: Complexity,
    status: JobStatus,
    assigned_workers: Vec<WorkerId>,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted job aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedJobData {
    /// Persisted job identifier.
    pub id: JobId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted requirement statements.
    pub requirements: Vec<String>,
    /// Persisted budget.
    pub budget: f64,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted skill tags.
    pub skills: Vec<String>,
    /// Persisted complexity.
    pub complexity: Complexity,
    /// Persisted lifecycle status.
    pub status: JobStatus,
    /// Persisted assigned workers.
    pub assigned_workers: Vec<WorkerId>,
    /// Persisted optimistic revision.
    pub revision: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Validates a draft and creates an open job owned by `company_id`.
    ///
    /// Blank requirement and skill entries are dropped; the rest are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EmptyTitle`] for a blank title,
    /// [`JobDomainError::InvalidBudget`] for a non-finite or non-positive
    /// budget, [`JobDomainError::DeadlineNotInFuture`] when the deadline
    /// is not after the current clock time, and
    /// [`JobDomainError::BlankRequirement`] for an empty requirement.
    pub fn post(
        company_id: CompanyId,
        draft: JobDraft,
        clock: &impl Clock,
    ) -> Result<Self, JobDomainError> {
        let timestamp = clock.utc();
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(JobDomainError::EmptyTitle);
        }
        if !draft.budget.is_finite() || draft.budget <= 0.0 {
            return Err(JobDomainError::InvalidBudget(draft.budget));
        }
        if draft.deadline <= timestamp {
            return Err(JobDomainError::DeadlineNotInFuture {
                deadline: draft.deadline,
            });
        }
        let requirements = requirement_list(draft.requirements)?;

        Ok(Self {
            id: JobId::new(),
            company_id,
            title: title.to_owned(),
            description: draft.description.trim().to_owned(),
            requirements,
            budget: draft.budget,
            deadline: draft.deadline,
            skills: non_blank(draft.skills),
            complexity: draft.complexity,
            status: JobStatus::Open,
            assigned_workers: Vec::new(),
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        Self {
            id: data.id,
            company_id: data.company_id,
            title: data.title,
            description: data.description,
            requirements: data.requirements,
            budget: data.budget,
            deadline: data.deadline,
            skills: data.skills,
            complexity: data.complexity,
            status: data.status,
            assigned_workers: data.assigned_workers,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the owning company.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the ordered requirement statements.
    #[must_use]
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the total budget.
    #[must_use]
    pub const fn budget(&self) -> f64 {
        self.budget
    }

    /// Returns the deadline inherited by every task of the job.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the required skill tags.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Returns the declared complexity.
    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the workers assigned to at least one task, in first-assigned
    /// order.
    #[must_use]
    pub fn assigned_workers(&self) -> &[WorkerId] {
        &self.assigned_workers
    }

    /// Returns the optimistic revision the aggregate was loaded at.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the decomposition input for this job.
    #[must_use]
    pub fn brief(&self) -> JobBrief {
        JobBrief {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            budget: self.budget,
            skills: self.skills.clone(),
            complexity: self.complexity,
        }
    }

    /// Records assignees and moves the job into [`JobStatus::InProgress`].
    ///
    /// New workers are appended after existing ones and duplicates are
    /// dropped. A job already in progress keeps its status.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] when the job is
    /// completed or cancelled.
    pub fn begin_work(
        &mut self,
        assignees: impl IntoIterator<Item = WorkerId>,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        if !self.status.accepts_assignments() {
            return Err(self.rejected_transition(JobStatus::InProgress));
        }
        for worker_id in assignees {
            if !self.assigned_workers.contains(&worker_id) {
                self.assigned_workers.push(worker_id);
            }
        }
        self.status = JobStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Moves the job to `target` when the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidStatusTransition`] when the transition
    /// is not permitted.
    pub fn transition_to(
        &mut self,
        target: JobStatus,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.rejected_transition(target));
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Returns a copy of this job stamped with `revision`.
    ///
    /// Repository adapters use this after a successful optimistic update.
    #[must_use]
    pub(crate) fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    const fn rejected_transition(&self, to: JobStatus) -> JobDomainError {
        JobDomainError::InvalidStatusTransition {
            job_id: self.id,
            from: self.status,
            to,
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn requirement_list(values: Vec<String>) -> Result<Vec<String>, JobDomainError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value.trim() {
            "" => Err(JobDomainError::BlankRequirement { index }),
            trimmed => Ok(trimmed.to_owned()),
        })
        .collect()
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect()
}
