//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Missions assigned to group members.
    ///
    /// Every group-scoped query filters on `group_id`. The reminder flags are
    /// only ever written with a `= FALSE` predicate so they stay monotonic.
    missions (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence; never reused.
        id -> Int8,
        /// Partition key of the owning group.
        group_id -> Int8,
        author_id -> Int8,
        assignee_id -> Int8,
        /// Non-blank text (CHECK constraint).
        description -> Text,
        deadline -> Nullable<Timestamptz>,
        status -> Text,
        done -> Bool,
        reminded_24 -> Bool,
        reminded_1 -> Bool,
        created_at -> Timestamptz,
    }
}
