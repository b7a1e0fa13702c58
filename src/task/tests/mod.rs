
use crate::job::domain::JobId;
use crate::task::domain::{MicroTask, Priority, Task};
use chrono::{Duration, Utc};
use mockable::DefaultClock;

fn micro_task(title: &str, skills: &[&str]) -> MicroTask {
    MicroTask {
        title: title.to_owned(),
        description: format!("Deliver {title}"),
        estimated_hours: 4.0,
        budget: 100.0,
        skills: skills.iter().map(|skill| (*skill).to_owned()).collect(),
        priority: Priority::Medium,
    }
}

fn pending_task(job_id: JobId, position: u32) -> Task {
    Task::from_micro_task(
        job_id,
        position,
        Utc::now() + Duration::days(7),
        micro_task(&format!("Task {position}"), &["react"]),
        &DefaultClock,
    )
}
