//! `PostgreSQL` repository implementation for job storage.

use super::{
    models::{JobChangeset, JobRow, NewJobRow},
    schema::jobs,
};
use crate::job::{
    domain::{CompanyId, Complexity, Job, JobId, JobStatus, PersistedJobData},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};
use crate::pg::{MarketplacePgPool, get_conn_with, run_blocking_with, strings_from_json, strings_to_json};
use crate::worker::domain::WorkerId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed job repository.
#[derive(Debug, Clone)]
pub struct PostgresJobRepository {
    pool: MarketplacePgPool,
}

impl PostgresJobRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MarketplacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, JobRepositoryError::persistence)?;
                f(&mut connection)
            },
            JobRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn store(&self, job: &Job) -> JobRepositoryResult<()> {
        let job_id = job.id();
        let new_row = to_new_row(job)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(jobs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        JobRepositoryError::DuplicateJob(job_id)
                    }
                    _ => JobRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<Job> {
        let job_id = job.id();
        let expected = job.revision();
        let expected_db = revision_to_db(expected)?;
        let next = expected + 1;
        let changeset = JobChangeset {
            status: job.status().as_str().to_owned(),
            assigned_workers: workers_to_json(job.assigned_workers()),
            revision: revision_to_db(next)?,
            updated_at: job.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                jobs::table
                    .filter(jobs::id.eq(job_id.into_inner()))
                    .filter(jobs::revision.eq(expected_db)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(JobRepositoryError::persistence)?;
            if affected == 1 {
                return Ok(());
            }

            let actual = jobs::table
                .filter(jobs::id.eq(job_id.into_inner()))
                .select(jobs::revision)
                .first::<i64>(connection)
                .optional()
                .map_err(JobRepositoryError::persistence)?
                .ok_or(JobRepositoryError::NotFound(job_id))?;
            Err(JobRepositoryError::RevisionConflict {
                job_id,
                expected,
                actual: u64::try_from(actual).map_err(JobRepositoryError::persistence)?,
            })
        })
        .await?;

        Ok(job.clone().with_revision(next))
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = jobs::table
                .filter(jobs::id.eq(id.into_inner()))
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()
                .map_err(JobRepositoryError::persistence)?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn find_by_company(&self, company_id: CompanyId) -> JobRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            let rows = jobs::table
                .filter(jobs::company_id.eq(company_id.into_inner()))
                .order((jobs::created_at.asc(), jobs::id.asc()))
                .select(JobRow::as_select())
                .load::<JobRow>(connection)
                .map_err(JobRepositoryError::persistence)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }
}

fn revision_to_db(revision: u64) -> JobRepositoryResult<i64> {
    i64::try_from(revision).map_err(JobRepositoryError::persistence)
}

fn workers_to_json(workers: &[WorkerId]) -> serde_json::Value {
    let ids: Vec<String> = workers.iter().map(ToString::to_string).collect();
    strings_to_json(&ids)
}

fn to_new_row(job: &Job) -> JobRepositoryResult<NewJobRow> {
    Ok(NewJobRow {
        id: job.id().into_inner(),
        company_id: job.company_id().into_inner(),
        title: job.title().to_owned(),
        description: job.description().to_owned(),
        requirements: strings_to_json(job.requirements()),
        budget: job.budget(),
        deadline: job.deadline(),
        skills: strings_to_json(job.skills()),
        complexity: job.complexity().as_str().to_owned(),
        status: job.status().as_str().to_owned(),
        assigned_workers: workers_to_json(job.assigned_workers()),
        revision: revision_to_db(job.revision())?,
        created_at: job.created_at(),
        updated_at: job.updated_at(),
    })
}

fn row_to_job(row: JobRow) -> JobRepositoryResult<Job> {
    let JobRow {
        id,
        company_id,
        title,
        description,
        requirements,
        budget,
        deadline,
        skills,
        complexity,
        status,
        assigned_workers,
        revision,
        created_at,
        updated_at,
    } = row;

    let complexity =
        Complexity::try_from(complexity.as_str()).map_err(JobRepositoryError::persistence)?;
    let status = JobStatus::try_from(status.as_str()).map_err(JobRepositoryError::persistence)?;
    let assigned_workers = serde_json::from_value::<Vec<WorkerId>>(assigned_workers)
        .map_err(JobRepositoryError::persistence)?;

    let data = PersistedJobData {
        id: JobId::from_uuid(id),
        company_id: CompanyId::from_uuid(company_id),
        title,
        description,
        requirements: strings_from_json(requirements).map_err(JobRepositoryError::persistence)?,
        budget,
        deadline,
        skills: strings_from_json(skills).map_err(JobRepositoryError::persistence)?,
        complexity,
        status,
        assigned_workers,
        revision: u64::try_from(revision).map_err(JobRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Job::from_persisted(data))
}
