//! Task aggregate root.

use super::{MicroTask, Priority, TaskDomainError, TaskId, TaskStatus};
use crate::job::domain::JobId;
use crate::worker::domain::WorkerId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    job_id: JobId,
    position: u32,
    title: String,
    description: String,
    estimated_hours: f64,
    budget: f64,
    skills: Vec<String>,
    priority: Priority,
    status: TaskStatus,
    assigned_to: Option<WorkerId>,
    deadline: DateTime<Utc>,
    deliverables: Vec<String>,
    dependencies: Vec<TaskId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Parent job.
    pub job_id: JobId,
    /// Position within the job's decomposition.
    pub position: u32,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted effort estimate.
    pub estimated_hours: f64,
    /// Persisted budget share.
    pub budget: f64,
    /// Persisted skill tags.
    pub skills: Vec<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted assignee, if any.
    pub assigned_to: Option<WorkerId>,
    /// Deadline inherited from the job.
    pub deadline: DateTime<Utc>,
    /// Persisted deliverable references.
    pub deliverables: Vec<String>,
    /// Persisted dependency references.
    pub dependencies: Vec<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task from a decomposition result.
    #[must_use]
    pub fn from_micro_task(
        job_id: JobId,
        position: u32,
        deadline: DateTime<Utc>,
        micro_task: MicroTask,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let MicroTask {
            title,
            description,
            estimated_hours,
            budget,
            skills,
            priority,
        } = micro_task;

        Self {
            id: TaskId::new(),
            job_id,
            position,
            title,
            description,
            estimated_hours,
            budget,
            skills,
            priority,
            status: TaskStatus::Pending,
            assigned_to: None,
            deadline,
            deliverables: Vec::new(),
            dependencies: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            job_id: data.job_id,
            position: data.position,
            title: data.title,
            description: data.description,
            estimated_hours: data.estimated_hours,
            budget: data.budget,
            skills: data.skills,
            priority: data.priority,
            status: data.status,
            assigned_to: data.assigned_to,
            deadline: data.deadline,
            deliverables: data.deliverables,
            dependencies: data.dependencies,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent job.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Returns the position within the job's decomposition.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
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

    /// Returns the effort estimate in hours.
    #[must_use]
    pub const fn estimated_hours(&self) -> f64 {
        self.estimated_hours
    }

    /// Returns the budget share.
    #[must_use]
    pub const fn budget(&self) -> f64 {
        self.budget
    }

    /// Returns the required skill tags.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<WorkerId> {
        self.assigned_to
    }

    /// Returns the deadline inherited from the job.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the deliverable references.
    #[must_use]
    pub fn deliverables(&self) -> &[String] {
        &self.deliverables
    }

    /// Returns the tasks this task depends on.
    #[must_use]
    pub fn dependencies(&self) -> &[TaskId] {
        &self.dependencies
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

    /// Assigns the task to `worker_id`, moving it from `pending` to
    /// `assigned`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the task is
    /// not pending.
    pub fn assign_to(
        &mut self,
        worker_id: WorkerId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Assigned)?;
        self.assigned_to = Some(worker_id);
        self.status = TaskStatus::Assigned;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to `target` when the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssigneeRequired`] for `assigned` (use
    /// [`Task::assign_to`]) and [`TaskDomainError::InvalidStateTransition`]
    /// for transitions outside the lifecycle.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if target == TaskStatus::Assigned {
            return Err(TaskDomainError::AssigneeRequired(self.id));
        }
        self.ensure_transition(target)?;
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Attaches a deliverable reference while the task is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDeliverable`] for a blank reference
    /// and [`TaskDomainError::DeliverableOutsideWork`] when the task is not
    /// in progress.
    pub fn add_deliverable(
        &mut self,
        deliverable: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let raw = deliverable.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDeliverable);
        }
        if self.status != TaskStatus::InProgress {
            return Err(TaskDomainError::DeliverableOutsideWork {
                task_id: self.id,
                status: self.status,
            });
        }
        self.deliverables.push(trimmed.to_owned());
        self.touch(clock);
        Ok(())
    }

    /// Records that this task cannot start before `dependency` is done.
    ///
    /// Repeated dependencies are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfDependency`] when `dependency` is this
    /// task.
    pub fn add_dependency(
        &mut self,
        dependency: TaskId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if dependency == self.id {
            return Err(TaskDomainError::SelfDependency(self.id));
        }
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
            self.touch(clock);
        }
        Ok(())
    }

    const fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            })
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
