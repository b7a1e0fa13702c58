//! Splitting a job brief into budgeted micro-tasks.

use super::keywords::{effort_multiplier, priority_for, table_skills};
use crate::job::domain::{Complexity, JobBrief};
use crate::task::domain::{MicroTask, Priority};
use minijinja::Environment;
use serde_json::{Map, Value};
use thiserror::Error;

/// Upper bound on a single task's effort estimate, in hours.
pub const MAX_TASK_HOURS: f64 = 12.0;

const PLANNING_SHARE: f64 = 0.20;
const TESTING_SHARE: f64 = 0.15;
const REVIEW_SHARE: f64 = 0.10;
const REVIEW_HOURS: f64 = 1.0;

/// Tasks added around the requirement tasks: planning, testing, review.
const FIXED_TASKS: u32 = 3;

/// Errors returned while decomposing a job.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecompositionError {
    /// The budget is zero, negative, or not a finite number.
    #[error("job budget must be a positive finite amount, got {0}")]
    InvalidBudget(f64),

    /// A title or description template failed to render.
    #[error("failed to render {template} template: {reason}")]
    TemplateRender {
        /// Which template failed.
        template: &'static str,
        /// Renderer error message.
        reason: String,
    },
}

/// `minijinja` templates for task titles and descriptions.
///
/// Every template sees `job_title`, `job_description`, `complexity`, and
/// `position` (1-based). Requirement templates additionally see
/// `requirement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTextTemplates {
    /// Planning task title.
    pub planning_title: String,
    /// Planning task description.
    pub planning_description: String,
    /// Requirement task title.
    pub requirement_title: String,
    /// Requirement task description.
    pub requirement_description: String,
    /// Testing task title.
    pub testing_title: String,
    /// Testing task description.
    pub testing_description: String,
    /// Review task title.
    pub review_title: String,
    /// Review task description.
    pub review_description: String,
}

impl Default for TaskTextTemplates {
    fn default() -> Self {
        Self {
            planning_title: "Project planning: {{ job_title }}".to_owned(),
            planning_description: "Research the brief for {{ job_title }} and plan the approach."
                .to_owned(),
            requirement_title: "{{ requirement }}".to_owned(),
            requirement_description: "Implement \"{{ requirement }}\" for {{ job_title }}."
                .to_owned(),
            testing_title: "Testing and quality assurance".to_owned(),
            testing_description:
                "Test every deliverable of {{ job_title }} against its requirements.".to_owned(),
            review_title: "Final review".to_owned(),
            review_description:
                "Review the deliverables of {{ job_title }} and document the handover."
                    .to_owned(),
        }
    }
}

/// Effort figures that depend only on complexity.
#[derive(Debug, Clone, Copy)]
struct ComplexityProfile {
    task_floor: u32,
    planning_hours: f64,
    requirement_hours: f64,
    testing_hours: f64,
}

impl ComplexityProfile {
    const fn of(complexity: Complexity) -> Self {
        match complexity {
            Complexity::Low => Self {
                task_floor: 3,
                planning_hours: 1.0,
                requirement_hours: 2.0,
                testing_hours: 1.0,
            },
            Complexity::Medium => Self {
                task_floor: 5,
                planning_hours: 2.0,
                requirement_hours: 4.0,
                testing_hours: 2.0,
            },
            Complexity::High => Self {
                task_floor: 8,
                planning_hours: 4.0,
                requirement_hours: 8.0,
                testing_hours: 3.0,
            },
        }
    }
}

/// Splits jobs into planning, requirement, testing, and review tasks.
///
/// Output order is always planning, one task per requirement in input order,
/// testing, then review. Decomposition is deterministic: the same brief
/// always yields the same tasks.
#[derive(Debug, Clone, Default)]
pub struct JobDecomposer {
    templates: TaskTextTemplates,
}

impl JobDecomposer {
    /// Creates a decomposer with the default text templates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text templates.
    #[must_use]
    pub fn with_templates(mut self, templates: TaskTextTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Returns the text templates in use.
    #[must_use]
    pub const fn templates(&self) -> &TaskTextTemplates {
        &self.templates
    }

    /// Returns the per-task budget unit for `brief`.
    ///
    /// The unit is the budget divided by the larger of the requirement count
    /// plus three and the complexity floor (3, 5, or 8). Fixed tasks receive
    /// a fraction of it; requirement tasks receive exactly one unit, so the
    /// allocated total is generally not the full budget.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError::InvalidBudget`] when the budget is not
    /// positive and finite.
    #[expect(clippy::float_arithmetic, reason = "budget allocation is fractional")]
    pub fn budget_per_task(brief: &JobBrief) -> Result<f64, DecompositionError> {
        if !brief.budget.is_finite() || brief.budget <= 0.0 {
            return Err(DecompositionError::InvalidBudget(brief.budget));
        }
        let profile = ComplexityProfile::of(brief.complexity);
        let requirement_count = u32::try_from(brief.requirements.len()).unwrap_or(u32::MAX);
        let task_count = requirement_count
            .saturating_add(FIXED_TASKS)
            .max(profile.task_floor);
        Ok(brief.budget / f64::from(task_count))
    }

    /// Decomposes `brief` into micro-tasks.
    ///
    /// # Errors
    ///
    /// Returns [`DecompositionError::InvalidBudget`] for a non-positive or
    /// non-finite budget and [`DecompositionError::TemplateRender`] when a
    /// custom template fails to render.
    #[expect(clippy::float_arithmetic, reason = "budget allocation is fractional")]
    pub fn decompose(&self, brief: &JobBrief) -> Result<Vec<MicroTask>, DecompositionError> {
        let unit = Self::budget_per_task(brief)?;
        let profile = ComplexityProfile::of(brief.complexity);
        let renderer = Renderer::new(brief);
        let mut tasks = Vec::with_capacity(brief.requirements.len().saturating_add(3));

        tasks.push(MicroTask {
            title: renderer.render("planning title", &self.templates.planning_title, 1, None)?,
            description: renderer.render(
                "planning description",
                &self.templates.planning_description,
                1,
                None,
            )?,
            estimated_hours: profile.planning_hours,
            budget: unit * PLANNING_SHARE,
            skills: vec!["research".to_owned(), "planning".to_owned()],
            priority: Priority::High,
        });

        for (index, requirement) in brief.requirements.iter().enumerate() {
            let position = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(2);
            let text = requirement.to_lowercase();
            let estimated_hours =
                (profile.requirement_hours * effort_multiplier(&text)).min(MAX_TASK_HOURS);
            tasks.push(MicroTask {
                title: renderer.render(
                    "requirement title",
                    &self.templates.requirement_title,
                    position,
                    Some(requirement.as_str()),
                )?,
                description: renderer.render(
                    "requirement description",
                    &self.templates.requirement_description,
                    position,
                    Some(requirement.as_str()),
                )?,
                estimated_hours,
                budget: unit,
                skills: requirement_skills(&text, &brief.skills),
                priority: priority_for(&text),
            });
        }

        let testing_position = u32::try_from(tasks.len()).unwrap_or(u32::MAX).saturating_add(1);
        tasks.push(MicroTask {
            title: renderer.render(
                "testing title",
                &self.templates.testing_title,
                testing_position,
                None,
            )?,
            description: renderer.render(
                "testing description",
                &self.templates.testing_description,
                testing_position,
                None,
            )?,
            estimated_hours: profile.testing_hours,
            budget: unit * TESTING_SHARE,
            skills: vec!["testing".to_owned(), "quality-assurance".to_owned()],
            priority: Priority::Medium,
        });

        let review_position = testing_position.saturating_add(1);
        tasks.push(MicroTask {
            title: renderer.render(
                "review title",
                &self.templates.review_title,
                review_position,
                None,
            )?,
            description: renderer.render(
                "review description",
                &self.templates.review_description,
                review_position,
                None,
            )?,
            estimated_hours: REVIEW_HOURS,
            budget: unit * REVIEW_SHARE,
            skills: vec!["review".to_owned(), "documentation".to_owned()],
            priority: Priority::Medium,
        });

        Ok(tasks)
    }
}

/// Skills for one requirement: table-derived tags, then any declared job
/// skill that overlaps the requirement text or one of those tags.
fn requirement_skills(text: &str, job_skills: &[String]) -> Vec<String> {
    let mut skills = table_skills(text);
    let derived = skills.clone();
    for declared in job_skills {
        let needle = declared.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let overlaps = |other: &str| other.contains(&needle) || needle.contains(other);
        let relevant = overlaps(text) || derived.iter().any(|tag| overlaps(tag.as_str()));
        if relevant && !skills.contains(declared) {
            skills.push(declared.clone());
        }
    }
    skills
}

struct Renderer {
    environment: Environment<'static>,
    base: Map<String, Value>,
}

impl Renderer {
    fn new(brief: &JobBrief) -> Self {
        let mut base = Map::new();
        base.insert("job_title".to_owned(), Value::String(brief.title.clone()));
        base.insert(
            "job_description".to_owned(),
            Value::String(brief.description.clone()),
        );
        base.insert(
            "complexity".to_owned(),
            Value::String(brief.complexity.as_str().to_owned()),
        );
        Self {
            environment: Environment::new(),
            base,
        }
    }

    fn render(
        &self,
        template_name: &'static str,
        template: &str,
        position: u32,
        requirement: Option<&str>,
    ) -> Result<String, DecompositionError> {
        let mut context = self.base.clone();
        context.insert("position".to_owned(), Value::from(position));
        if let Some(text) = requirement {
            context.insert("requirement".to_owned(), Value::String(text.to_owned()));
        }
        self.environment
            .render_str(template, context)
            .map_err(|error| DecompositionError::TemplateRender {
                template: template_name,
                reason: error.to_string(),
            })
    }
}
