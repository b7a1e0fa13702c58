//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::job::domain::JobId;
use crate::pg::{MarketplacePgPool, get_conn_with, run_blocking_with, strings_from_json, strings_to_json};
use crate::task::{
    domain::{PersistedTaskData, Priority, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::worker::domain::WorkerId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: MarketplacePgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MarketplacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let Some(first_id) = tasks.first().map(Task::id) else {
            return Ok(());
        };
        let ids: Vec<uuid::Uuid> = tasks.iter().map(|task| task.id().into_inner()).collect();
        let rows = tasks
            .iter()
            .map(to_new_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                // The pre-check names the clashing task; the primary key still
                // guards the window between check and insert.
                let existing = tasks::table
                    .filter(tasks::id.eq_any(&ids))
                    .select(tasks::id)
                    .first::<uuid::Uuid>(tx)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?;
                if let Some(existing_id) = existing {
                    return Err(TaskRepositoryError::DuplicateTask(TaskId::from_uuid(
                        existing_id,
                    )));
                }

                diesel::insert_into(tasks::table)
                    .values(&rows)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(first_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, task: &Task, expected_status: TaskStatus) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskChangeset {
            status: task.status().as_str().to_owned(),
            assigned_to: task.assigned_to().map(WorkerId::into_inner),
            deliverables: strings_to_json(task.deliverables()),
            dependencies: dependencies_to_json(task.dependencies()),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::status.eq(expected_status.as_str())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if affected == 1 {
                return Ok(());
            }

            let stored = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(tasks::status)
                .first::<String>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(task_id))?;
            let actual =
                TaskStatus::try_from(stored.as_str()).map_err(TaskRepositoryError::persistence)?;
            Err(TaskRepositoryError::StatusConflict {
                task_id,
                expected: expected_status,
                actual,
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_job(&self, job_id: JobId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::job_id.eq(job_id.into_inner()))
                .order(tasks::position.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_pending_by_job(&self, job_id: JobId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::job_id.eq(job_id.into_inner()))
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .order(tasks::position.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_assignee(&self, worker_id: WorkerId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(worker_id.into_inner()))
                .order((tasks::job_id.asc(), tasks::position.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn dependencies_to_json(dependencies: &[TaskId]) -> serde_json::Value {
    let ids: Vec<String> = dependencies.iter().map(ToString::to_string).collect();
    strings_to_json(&ids)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        job_id: task.job_id().into_inner(),
        position: i32::try_from(task.position()).map_err(TaskRepositoryError::persistence)?,
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        estimated_hours: task.estimated_hours(),
        budget: task.budget(),
        skills: strings_to_json(task.skills()),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assigned_to: task.assigned_to().map(WorkerId::into_inner),
        deadline: task.deadline(),
        deliverables: strings_to_json(task.deliverables()),
        dependencies: dependencies_to_json(task.dependencies()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        job_id,
        position,
        title,
        description,
        estimated_hours,
        budget,
        skills,
        priority,
        status,
        assigned_to,
        deadline,
        deliverables,
        dependencies,
        created_at,
        updated_at,
    } = row;

    let priority = Priority::try_from(priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let dependencies = serde_json::from_value::<Vec<TaskId>>(dependencies)
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        job_id: JobId::from_uuid(job_id),
        position: u32::try_from(position).map_err(TaskRepositoryError::persistence)?,
        title,
        description,
        estimated_hours,
        budget,
        skills: strings_from_json(skills).map_err(TaskRepositoryError::persistence)?,
        priority,
        status,
        assigned_to: assigned_to.map(WorkerId::from_uuid),
        deadline,
        deliverables: strings_from_json(deliverables).map_err(TaskRepositoryError::persistence)?,
        dependencies,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
