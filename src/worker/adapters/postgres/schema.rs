//! Diesel schema for the worker roster.

diesel::table! {
    /// Marketplace accounts considered for assignment.
    workers (id) {
        /// Worker identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Account role.
        #[max_length = 20]
        role -> Varchar,
        /// Skill tags as a JSON array of strings.
        skills -> Jsonb,
        /// Whether the worker currently accepts work.
        available -> Bool,
        /// Rating between 0 and 5.
        rating -> Float8,
        /// Number of completed tasks.
        completed_tasks -> Int4,
        /// Registration timestamp, used to keep roster order stable.
        enrolled_at -> Timestamptz,
    }
}
