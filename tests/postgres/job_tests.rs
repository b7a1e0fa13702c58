//! Job storage tests against `PostgreSQL`.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests assert on outcomes while propagating setup errors with `?`"
)]

use super::helpers::{BoxError, storefront_job, test_database};
use gigboard::job::{
    adapters::postgres::PostgresJobRepository,
    domain::{CompanyId, JobStatus},
    ports::{JobRepository, JobRepositoryError},
};
use gigboard::worker::domain::WorkerId;
use mockable::DefaultClock;

#[tokio::test(flavor = "multi_thread")]
async fn stored_job_round_trips() -> Result<(), BoxError> {
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresJobRepository::new(database.pool());
    let job = storefront_job(CompanyId::new())?;

    repository.store(&job).await?;
    let found = repository.find_by_id(job.id()).await?.ok_or("job missing")?;

    assert_eq!(found.title(), job.title());
    assert_eq!(found.requirements(), job.requirements());
    assert_eq!(found.skills(), job.skills());
    assert_eq!(found.complexity(), job.complexity());
    assert_eq!(found.status(), JobStatus::Open);
    assert_eq!(found.revision(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_bumps_revision_and_rejects_stale_copies() -> Result<(), BoxError> {
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresJobRepository::new(database.pool());
    let job = storefront_job(CompanyId::new())?;
    repository.store(&job).await?;

    let worker_id = WorkerId::new();
    let mut first = job.clone();
    first.begin_work([worker_id], &DefaultClock)?;
    let stored = repository.update(&first).await?;
    assert_eq!(stored.revision(), 1);

    let mut stale = job.clone();
    stale.begin_work([WorkerId::new()], &DefaultClock)?;
    let result = repository.update(&stale).await;
    assert!(matches!(
        result,
        Err(JobRepositoryError::RevisionConflict {
            expected: 0,
            actual: 1,
            ..
        })
    ));

    let found = repository.find_by_id(job.id()).await?.ok_or("job missing")?;
    assert_eq!(found.assigned_workers(), [worker_id]);
    assert_eq!(found.status(), JobStatus::InProgress);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_and_missing_jobs_are_reported() -> Result<(), BoxError> {
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresJobRepository::new(database.pool());
    let job = storefront_job(CompanyId::new())?;
    repository.store(&job).await?;

    let duplicate = repository.store(&job).await;
    assert!(matches!(duplicate, Err(JobRepositoryError::DuplicateJob(id)) if id == job.id()));

    let unknown = storefront_job(CompanyId::new())?;
    let missing = repository.update(&unknown).await;
    assert!(matches!(missing, Err(JobRepositoryError::NotFound(id)) if id == unknown.id()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn company_jobs_are_listed_oldest_first() -> Result<(), BoxError> {
    let Some(database) = test_database()? else {
        return Ok(());
    };
    let repository = PostgresJobRepository::new(database.pool());
    let company_id = CompanyId::new();
    let older = storefront_job(company_id)?;
    std::thread::sleep(std::time::Duration::from_millis(5));
    let newer = storefront_job(company_id)?;
    repository.store(&older).await?;
    repository.store(&newer).await?;
    repository.store(&storefront_job(CompanyId::new())?).await?;

    let listed = repository.find_by_company(company_id).await?;

    let ids: Vec<_> = listed.iter().map(|job| job.id()).collect();
    assert_eq!(ids, vec![older.id(), newer.id()]);
    Ok(())
}
