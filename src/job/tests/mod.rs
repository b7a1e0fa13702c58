
use crate::job::domain::{Complexity, JobDraft};
use chrono::{Duration, Utc};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn draft(requirements: &[&str], skills: &[&str]) -> JobDraft {
    JobDraft::new(
        "Storefront rebuild",
        1_200.0,
        Utc::now() + Duration::days(14),
        Complexity::Medium,
    )
    .with_description("Rebuild the storefront on a modern stack")
    .with_requirements(strings(requirements))
    .with_skills(strings(skills))
}
