//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Micro-tasks generated from posted jobs.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Parent job.
        job_id -> Uuid,
        /// Position within the job's decomposition.
        position -> Int4,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Effort estimate in hours.
        estimated_hours -> Float8,
        /// Budget share.
        budget -> Float8,
        /// Skill tags as a JSON array of strings.
        skills -> Jsonb,
        /// Priority level.
        #[max_length = 20]
        priority -> Varchar,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Assigned worker, if any.
        assigned_to -> Nullable<Uuid>,
        /// Deadline inherited from the job.
        deadline -> Timestamptz,
        /// Deliverable references as a JSON array of strings.
        deliverables -> Jsonb,
        /// Dependency task identifiers as a JSON array.
        dependencies -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
