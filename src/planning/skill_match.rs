//! Skill overlap between a task and a worker.

use crate::task::domain::{MicroTask, Task};
use serde::Serialize;

/// Anything that declares the skills needed to do it.
pub trait SkillDemand {
    /// Returns the required skill tags.
    fn required_skills(&self) -> &[String];
}

impl SkillDemand for MicroTask {
    fn required_skills(&self) -> &[String] {
        &self.skills
    }
}

impl SkillDemand for Task {
    fn required_skills(&self) -> &[String] {
        self.skills()
    }
}

/// How many of a task's required skills a worker covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillMatch {
    matched: u32,
    required: u32,
}

impl SkillMatch {
    /// Counts required skills that the worker holds verbatim.
    ///
    /// Comparison is exact and case-sensitive.
    #[must_use]
    pub fn exact(required: &[String], offered: &[String]) -> Self {
        Self::count(required, |skill| offered.iter().any(|own| own == skill))
    }

    /// Counts required skills that overlap a worker skill by case-insensitive
    /// containment in either direction.
    #[must_use]
    pub fn fuzzy(required: &[String], offered: &[String]) -> Self {
        let offered_lower: Vec<String> = offered.iter().map(|own| own.to_lowercase()).collect();
        Self::count(required, |skill| {
            let wanted = skill.to_lowercase();
            offered_lower
                .iter()
                .any(|own| own.contains(&wanted) || wanted.contains(own.as_str()))
        })
    }

    fn count(required: &[String], mut covered: impl FnMut(&String) -> bool) -> Self {
        let matched = required.iter().filter(|skill| covered(skill)).count();
        Self {
            matched: saturating_u32(matched),
            required: saturating_u32(required.len()),
        }
    }

    /// Returns the number of covered skills.
    #[must_use]
    pub const fn matched(self) -> u32 {
        self.matched
    }

    /// Returns the number of required skills.
    #[must_use]
    pub const fn required(self) -> u32 {
        self.required
    }

    /// Returns whether the task declared no skills at all.
    ///
    /// A degenerate match has fraction `0.0` and never passes a threshold.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.required == 0
    }

    /// Returns the covered share of required skills in `0.0..=1.0`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "skill match is a ratio")]
    pub fn fraction(self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        f64::from(self.matched) / f64::from(self.required)
    }

    /// Returns the fraction as a whole-number percentage, for example `"67%"`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "percentage scaling")]
    pub fn percent_label(self) -> String {
        format!("{}%", (self.fraction() * 100.0).round())
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
