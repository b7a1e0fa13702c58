//! Best-match assignment by weighted score.

use super::{AssignmentPlan, ScoreWeights, UnassignedReason};
use crate::planning::{SkillDemand, SkillMatch};
use crate::worker::domain::WorkerCandidate;

/// Picks, per task, the worker-role candidate with the highest score.
///
/// Skill overlap is fuzzy. Availability only changes the bonus, so an
/// unavailable worker can still win. Ties go to the earlier roster entry.
pub(super) fn assign<T: SkillDemand>(
    weights: &ScoreWeights,
    tasks: &[T],
    roster: &[WorkerCandidate],
) -> AssignmentPlan {
    let candidates: Vec<&WorkerCandidate> =
        roster.iter().filter(|worker| worker.is_worker()).collect();

    let mut plan = AssignmentPlan::default();
    for (task_index, task) in tasks.iter().enumerate() {
        let mut best: Option<(&WorkerCandidate, SkillMatch, f64)> = None;
        for &worker in &candidates {
            let skill_match = SkillMatch::fuzzy(task.required_skills(), worker.skills());
            let score = weights.score(worker, skill_match);
            if best.is_none_or(|(_, _, top)| score > top) {
                best = Some((worker, skill_match, score));
            }
        }
        match best {
            Some((worker, skill_match, _)) => plan.accept(task_index, worker, skill_match),
            None => plan.leave(task_index, UnassignedReason::NoCandidate),
        }
    }
    plan
}
