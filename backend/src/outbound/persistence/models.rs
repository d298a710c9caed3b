//! Internal Diesel row structs for the `missions` table.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain missions.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::missions;

/// Row struct for reading from the missions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = missions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MissionRow {
    pub id: i64,
    pub group_id: i64,
    pub author_id: i64,
    pub assignee_id: i64,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub done: bool,
    pub reminded_24: bool,
    pub reminded_1: bool,
    #[expect(dead_code, reason = "audit column read for completeness")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new missions; status and flags use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = missions)]
pub(crate) struct NewMissionRow<'a> {
    pub group_id: i64,
    pub author_id: i64,
    pub assignee_id: i64,
    pub description: &'a str,
    pub deadline: Option<DateTime<Utc>>,
}
