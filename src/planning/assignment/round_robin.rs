//! Round-robin assignment with an acceptance threshold.

use super::{AssignmentError, AssignmentPlan, CursorAdvance, RoundRobinPolicy, UnassignedReason};
use crate::planning::{SkillDemand, SkillMatch};
use crate::worker::domain::WorkerCandidate;

/// Filters the roster to available workers sharing a job skill, sorts them
/// by rating then experience (both descending, ties keep roster order), and
/// offers task `i` to the worker under the cursor.
pub(super) fn assign<T: SkillDemand>(
    policy: &RoundRobinPolicy,
    job_skills: &[String],
    tasks: &[T],
    roster: &[WorkerCandidate],
) -> Result<AssignmentPlan, AssignmentError> {
    let mut pool: Vec<&WorkerCandidate> = roster
        .iter()
        .filter(|worker| {
            worker.is_worker() && worker.is_available() && worker.shares_skill_with(job_skills)
        })
        .collect();
    if pool.is_empty() {
        return Err(AssignmentError::NoEligibleWorkers);
    }
    pool.sort_by(|left, right| {
        right
            .rating()
            .total_cmp(&left.rating())
            .then_with(|| right.completed_tasks().cmp(&left.completed_tasks()))
    });

    let mut plan = AssignmentPlan::default();
    let mut cursor: usize = 0;
    for (task_index, task) in tasks.iter().enumerate() {
        let worker = cursor
            .checked_rem(pool.len())
            .and_then(|slot| pool.get(slot))
            .ok_or(AssignmentError::NoEligibleWorkers)?;
        let skill_match = SkillMatch::exact(task.required_skills(), worker.skills());

        let accepted = if skill_match.is_degenerate() {
            plan.leave(task_index, UnassignedReason::DegenerateSkillSet);
            false
        } else if skill_match.fraction() >= policy.threshold() {
            plan.accept(task_index, worker, skill_match);
            true
        } else {
            plan.leave(
                task_index,
                UnassignedReason::BelowThreshold {
                    worker_id: worker.id(),
                    skill_match,
                },
            );
            false
        };

        if accepted || policy.cursor() == CursorAdvance::EveryTask {
            cursor = cursor.wrapping_add(1);
        }
    }
    Ok(plan)
}
