//! Diesel row models for worker persistence.

use super::schema::workers;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for worker records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkerRow {
    /// Worker identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: String,
    /// Skill tags JSON array.
    pub skills: Value,
    /// Availability flag.
    pub available: bool,
    /// Rating.
    pub rating: f64,
    /// Completed task count.
    pub completed_tasks: i32,
    /// Registration timestamp.
    pub enrolled_at: DateTime<Utc>,
}

/// Insert model for worker records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workers)]
pub struct NewWorkerRow {
    /// Worker identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: String,
    /// Skill tags JSON array.
    pub skills: Value,
    /// Availability flag.
    pub available: bool,
    /// Rating.
    pub rating: f64,
    /// Completed task count.
    pub completed_tasks: i32,
}
