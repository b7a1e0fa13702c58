//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::job::domain::JobId;
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::worker::domain::WorkerId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    job_index: HashMap<JobId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects the tasks of a job that satisfy `keep`, ordered by position.
fn tasks_of_job(
    state: &InMemoryTaskState,
    job_id: JobId,
    keep: impl Fn(&Task) -> bool,
) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .job_index
        .get(&job_id)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| state.tasks.get(id))
                .filter(|task| keep(task))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    tasks.sort_by_key(Task::position);
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(duplicate) = tasks.iter().find(|task| state.tasks.contains_key(&task.id())) {
            return Err(TaskRepositoryError::DuplicateTask(duplicate.id()));
        }

        for task in tasks {
            state
                .job_index
                .entry(task.job_id())
                .or_default()
                .push(task.id());
            state.tasks.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn update(&self, task: &Task, expected_status: TaskStatus) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.status() != expected_status {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: task.id(),
                expected: expected_status,
                actual: stored.status(),
            });
        }
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_job(&self, job_id: JobId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(tasks_of_job(&state, job_id, |_| true))
    }

    async fn find_pending_by_job(&self, job_id: JobId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(tasks_of_job(&state, job_id, |task| {
            task.status() == TaskStatus::Pending
        }))
    }

    async fn find_by_assignee(&self, worker_id: WorkerId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.assigned_to() == Some(worker_id))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.job_id().into_inner(), task.position()));
        Ok(tasks)
    }
}
