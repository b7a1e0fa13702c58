//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Parent job.
    pub job_id: uuid::Uuid,
    /// Position within the job.
    pub position: i32,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Effort estimate.
    pub estimated_hours: f64,
    /// Budget share.
    pub budget: f64,
    /// Skills JSON array.
    pub skills: Value,
    /// Priority level.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Assigned worker.
    pub assigned_to: Option<uuid::Uuid>,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Deliverables JSON array.
    pub deliverables: Value,
    /// Dependencies JSON array.
    pub dependencies: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Parent job.
    pub job_id: uuid::Uuid,
    /// Position within the job.
    pub position: i32,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Effort estimate.
    pub estimated_hours: f64,
    /// Budget share.
    pub budget: f64,
    /// Skills JSON array.
    pub skills: Value,
    /// Priority level.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Assigned worker.
    pub assigned_to: Option<uuid::Uuid>,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Deliverables JSON array.
    pub deliverables: Value,
    /// Dependencies JSON array.
    pub dependencies: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task columns written by a guarded update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Lifecycle status.
    pub status: String,
    /// Assigned worker.
    pub assigned_to: Option<uuid::Uuid>,
    /// Deliverables JSON array.
    pub deliverables: Value,
    /// Dependencies JSON array.
    pub dependencies: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
