//! `PostgreSQL` implementation of the worker directory.

use super::{
    models::{NewWorkerRow, WorkerRow},
    schema::workers,
};
use crate::pg::{MarketplacePgPool, get_conn_with, run_blocking_with, strings_from_json, strings_to_json};
use crate::worker::{
    domain::{CandidateQuery, PersistedWorkerData, WorkerCandidate, WorkerId, WorkerRole},
    ports::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed worker directory.
#[derive(Debug, Clone)]
pub struct PostgresWorkerDirectory {
    pool: MarketplacePgPool,
}

impl PostgresWorkerDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MarketplacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkerDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkerDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, WorkerDirectoryError::persistence)?;
                f(&mut connection)
            },
            WorkerDirectoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl WorkerDirectory for PostgresWorkerDirectory {
    async fn register(&self, worker: &WorkerCandidate) -> WorkerDirectoryResult<()> {
        let worker_id = worker.id();
        let new_row = to_new_row(worker)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(workers::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkerDirectoryError::DuplicateWorker(worker_id)
                    }
                    _ => WorkerDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkerId) -> WorkerDirectoryResult<Option<WorkerCandidate>> {
        self.run_blocking(move |connection| {
            let row = workers::table
                .filter(workers::id.eq(id.into_inner()))
                .select(WorkerRow::as_select())
                .first::<WorkerRow>(connection)
                .optional()
                .map_err(WorkerDirectoryError::persistence)?;
            row.map(row_to_worker).transpose()
        })
        .await
    }

    async fn find_candidates(
        &self,
        query: &CandidateQuery,
    ) -> WorkerDirectoryResult<Vec<WorkerCandidate>> {
        let query = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = workers::table
                .filter(workers::role.eq(query.role().as_str()))
                .order((workers::enrolled_at.asc(), workers::id.asc()))
                .select(WorkerRow::as_select())
                .into_boxed();
            if query.available_only() {
                statement = statement.filter(workers::available.eq(true));
            }
            let rows = statement
                .load::<WorkerRow>(connection)
                .map_err(WorkerDirectoryError::persistence)?;

            // Skill overlap is exact tag equality via `CandidateQuery::matches`.
            let mut candidates = Vec::with_capacity(rows.len());
            for row in rows {
                let candidate = row_to_worker(row)?;
                if query.matches(&candidate) {
                    candidates.push(candidate);
                }
            }
            Ok(candidates)
        })
        .await
    }
}

fn to_new_row(worker: &WorkerCandidate) -> WorkerDirectoryResult<NewWorkerRow> {
    let completed_tasks =
        i32::try_from(worker.completed_tasks()).map_err(WorkerDirectoryError::persistence)?;
    Ok(NewWorkerRow {
        id: worker.id().into_inner(),
        name: worker.name().to_owned(),
        role: worker.role().as_str().to_owned(),
        skills: strings_to_json(worker.skills()),
        available: worker.is_available(),
        rating: worker.rating(),
        completed_tasks,
    })
}

fn row_to_worker(row: WorkerRow) -> WorkerDirectoryResult<WorkerCandidate> {
    let WorkerRow {
        id,
        name,
        role,
        skills,
        available,
        rating,
        completed_tasks,
        enrolled_at: _,
    } = row;

    let role = WorkerRole::try_from(role.as_str()).map_err(WorkerDirectoryError::persistence)?;
    let skills = strings_from_json(skills).map_err(WorkerDirectoryError::persistence)?;
    let completed_tasks =
        u32::try_from(completed_tasks).map_err(WorkerDirectoryError::persistence)?;

    Ok(WorkerCandidate::from_persisted(PersistedWorkerData {
        id: WorkerId::from_uuid(id),
        name,
        role,
        skills,
        available,
        rating,
        completed_tasks,
    }))
}
