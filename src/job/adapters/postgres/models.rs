//! Diesel row models for job persistence.

use super::schema::jobs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for job records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Job identifier.
    pub id: uuid::Uuid,
    /// Owning company.
    pub company_id: uuid::Uuid,
    /// Job title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Requirements JSON array.
    pub requirements: Value,
    /// Total budget.
    pub budget: f64,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Skills JSON array.
    pub skills: Value,
    /// Complexity level.
    pub complexity: String,
    /// Lifecycle status.
    pub status: String,
    /// Assigned workers JSON array.
    pub assigned_workers: Value,
    /// Optimistic revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub struct NewJobRow {
    /// Job identifier.
    pub id: uuid::Uuid,
    /// Owning company.
    pub company_id: uuid::Uuid,
    /// Job title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Requirements JSON array.
    pub requirements: Value,
    /// Total budget.
    pub budget: f64,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Skills JSON array.
    pub skills: Value,
    /// Complexity level.
    pub complexity: String,
    /// Lifecycle status.
    pub status: String,
    /// Assigned workers JSON array.
    pub assigned_workers: Value,
    /// Optimistic revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by an optimistic job update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
pub struct JobChangeset {
    /// Lifecycle status.
    pub status: String,
    /// Assigned workers JSON array.
    pub assigned_workers: Value,
    /// Next revision.
    pub revision: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
