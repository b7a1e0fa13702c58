//! Diesel schema for job persistence.

diesel::table! {
    /// Jobs posted by companies.
    jobs (id) {
        /// Job identifier.
        id -> Uuid,
        /// Owning company.
        company_id -> Uuid,
        /// Job title.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Requirement statements as a JSON array of strings.
        requirements -> Jsonb,
        /// Total budget.
        budget -> Float8,
        /// Deadline inherited by tasks.
        deadline -> Timestamptz,
        /// Skill tags as a JSON array of strings.
        skills -> Jsonb,
        /// Complexity level.
        #[max_length = 20]
        complexity -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Assigned worker identifiers as a JSON array.
        assigned_workers -> Jsonb,
        /// Optimistic concurrency revision.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
