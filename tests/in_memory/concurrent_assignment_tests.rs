//! Competing assignment runs against one job.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests assert on outcomes while propagating setup errors with `?`"
)]

use std::sync::Arc;

use super::helpers::{BoxError, Marketplace, marketplace, post_storefront};
use gigboard::job::{ports::JobRepositoryError, services::JobAssignmentError};
use gigboard::planning::AssignmentStrategy;
use gigboard::task::domain::TaskStatus;
use rstest::rstest;

const fn is_lost_race(err: &JobAssignmentError) -> bool {
    matches!(
        err,
        JobAssignmentError::JobRepository(JobRepositoryError::RevisionConflict { .. })
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_runs_never_assign_a_task_twice(
    #[from(marketplace)] setup: Result<Marketplace, BoxError>,
) -> Result<(), BoxError> {
    let marketplace = setup?;
    let posted = post_storefront(&marketplace).await?;
    let job_id = posted.job().id();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = Arc::clone(&marketplace.assignment);
            tokio::spawn(async move {
                service
                    .assign_workers(job_id, &AssignmentStrategy::best_match())
                    .await
            })
        })
        .collect();

    let mut winners = Vec::new();
    let mut lost = 0_usize;
    for handle in handles {
        match handle.await? {
            Ok(report) => winners.push(report),
            Err(err) if is_lost_race(&err) => lost += 1,
            Err(err) => return Err(err.into()),
        }
    }
    assert!(!winners.is_empty(), "at least one run must commit");

    let job = marketplace
        .posting
        .find_job(job_id)
        .await?
        .ok_or("job missing")?;
    let tasks = marketplace.posting.tasks_for_job(job_id).await?;
    for task in &tasks {
        let Some(worker_id) = task.assigned_to() else {
            assert_eq!(task.status(), TaskStatus::Pending);
            continue;
        };
        assert_eq!(task.status(), TaskStatus::Assigned);
        assert!(job.assigned_workers().contains(&worker_id));
    }
    for worker_id in job.assigned_workers() {
        assert!(
            tasks
                .iter()
                .any(|task| task.assigned_to() == Some(*worker_id)),
            "job lists a worker that holds no task"
        );
    }
    for report in &winners {
        for task_id in report.contended() {
            let task = tasks
                .iter()
                .find(|task| task.id() == *task_id)
                .ok_or("contended task missing")?;
            assert_eq!(task.status(), TaskStatus::Assigned);
        }
    }

    let assigned_in_reports: usize = winners
        .iter()
        .map(|report| report.assignments().len())
        .sum();
    let assigned_in_store = tasks
        .iter()
        .filter(|task| task.assigned_to().is_some())
        .count();
    if lost == 0 {
        assert_eq!(assigned_in_reports, assigned_in_store);
    } else {
        assert!(assigned_in_reports <= assigned_in_store);
    }
    Ok(())
}
