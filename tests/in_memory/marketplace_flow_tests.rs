//! End-to-end flows across posting, assignment, and the task workflow.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests assert on outcomes while propagating setup errors with `?`"
)]

use super::helpers::{
    BoxError, Marketplace, frontend_roster, marketplace, marketplace_with, post_storefront,
    storefront_draft,
};
use gigboard::job::{
    domain::JobStatus,
    services::{JobAssignmentError, PostJobRequest},
};
use gigboard::planning::{AssignmentError, AssignmentStrategy, ScoreWeights};
use gigboard::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskWorkflowError,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn round_robin_then_best_match_covers_every_task(
    #[from(marketplace)] setup: Result<Marketplace, BoxError>,
) -> Result<(), BoxError> {
    let marketplace = setup?;
    let posted = post_storefront(&marketplace).await?;
    let job_id = posted.job().id();
    let frontend_task = posted.tasks().get(1).ok_or("missing frontend task")?.id();

    let first = marketplace
        .assignment
        .assign_workers(job_id, &AssignmentStrategy::round_robin())
        .await?;
    assert_eq!(first.strategy(), "round-robin");
    assert_eq!(first.assignments().len(), 1);
    let only = first.assignments().first().ok_or("missing assignment")?;
    assert_eq!(only.task_id, frontend_task);
    assert_eq!(only.worker_name, "Ada");
    assert_eq!(only.skill_match, "100%");
    assert_eq!(first.pending().len(), 4);
    assert_eq!(first.job().status(), JobStatus::InProgress);
    assert_eq!(first.job().revision(), 1);

    let second = marketplace
        .assignment
        .assign_workers(job_id, &AssignmentStrategy::best_match())
        .await?;
    assert_eq!(second.assignments().len(), 4);
    assert!(second.pending().is_empty());
    assert_eq!(second.job().revision(), 2);
    let names: Vec<&str> = second
        .assignments()
        .iter()
        .map(|assignment| assignment.worker_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ada", "Ada", "Linus", "Ada"]);
    assert_eq!(second.job().assigned_workers().len(), 2);

    let tasks = marketplace.posting.tasks_for_job(job_id).await?;
    assert!(tasks.iter().all(|task| task.status() == TaskStatus::Assigned));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_worker_carries_a_task_to_review(
    #[from(marketplace)] setup: Result<Marketplace, BoxError>,
) -> Result<(), BoxError> {
    let marketplace = setup?;
    let posted = post_storefront(&marketplace).await?;
    let report = marketplace
        .assignment
        .assign_workers(posted.job().id(), &AssignmentStrategy::round_robin())
        .await?;
    let assignment = report.assignments().first().ok_or("missing assignment")?;

    let queue = marketplace
        .workflow
        .tasks_for_worker(assignment.worker_id)
        .await?;
    assert_eq!(queue.len(), 1);

    let task_id = assignment.task_id;
    marketplace
        .workflow
        .transition(task_id, TaskStatus::InProgress)
        .await?;
    marketplace
        .workflow
        .add_deliverable(task_id, "https://storefront.example/landing")
        .await?;
    marketplace
        .workflow
        .transition(task_id, TaskStatus::Completed)
        .await?;
    let reviewed = marketplace
        .workflow
        .transition(task_id, TaskStatus::Reviewed)
        .await?;

    assert_eq!(reviewed.status(), TaskStatus::Reviewed);
    assert_eq!(reviewed.assigned_to(), Some(assignment.worker_id));
    assert_eq!(reviewed.deliverables().len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_task_cannot_skip_to_completed(
    #[from(marketplace)] setup: Result<Marketplace, BoxError>,
) -> Result<(), BoxError> {
    let marketplace = setup?;
    let posted = post_storefront(&marketplace).await?;
    let task_id = posted.tasks().first().ok_or("missing planning task")?.id();

    let result = marketplace
        .workflow
        .transition(task_id, TaskStatus::Completed)
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Domain(
            TaskDomainError::InvalidStateTransition { .. }
        ))
    ));
    let stored = marketplace
        .workflow
        .find_task(task_id)
        .await?
        .ok_or("planning task vanished")?;
    assert_eq!(stored.status(), TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn auto_assignment_staffs_the_job_at_posting_time() -> Result<(), BoxError> {
    let mut marketplace = marketplace_with(frontend_roster()?);
    marketplace.posting = marketplace
        .posting
        .with_auto_assignment(ScoreWeights::default());

    let posted = marketplace
        .posting
        .post_job(PostJobRequest::new(marketplace.company_id, storefront_draft()))
        .await?;

    assert_eq!(posted.job().status(), JobStatus::InProgress);
    assert!(posted.tasks().iter().all(|task| task.assigned_to().is_some()));
    let stored = marketplace
        .posting
        .find_job(posted.job().id())
        .await?
        .ok_or("posted job missing")?;
    assert_eq!(stored.assigned_workers(), posted.job().assigned_workers());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_roster_leaves_job_open() -> Result<(), BoxError> {
    let marketplace = marketplace_with(Vec::new());
    let posted = post_storefront(&marketplace).await?;

    let result = marketplace
        .assignment
        .assign_workers(posted.job().id(), &AssignmentStrategy::round_robin())
        .await;

    assert!(matches!(
        result,
        Err(JobAssignmentError::Assignment(
            AssignmentError::NoEligibleWorkers
        ))
    ));
    let stored = marketplace
        .posting
        .find_job(posted.job().id())
        .await?
        .ok_or("posted job missing")?;
    assert_eq!(stored.status(), JobStatus::Open);
    assert_eq!(stored.revision(), 0);
    Ok(())
}
