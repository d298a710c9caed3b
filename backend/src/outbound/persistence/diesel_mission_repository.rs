//! PostgreSQL-backed `MissionRepository` using Diesel.
//!
//! Every group-scoped statement carries a `group_id` predicate. Flag and
//! status writes require `done = FALSE` and encode their other preconditions
//! in the same `WHERE` clause, so one statement checks and sets atomically.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MissionRepository, MissionRepositoryError};
use crate::domain::{
    GroupId, MemberId, Mission, MissionDraft, MissionFilter, MissionId, MissionStatus, NewMission,
    ReminderThreshold,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MissionRow, NewMissionRow};
use super::pool::DbPool;
use super::schema::missions;

/// Diesel-backed implementation of the mission repository port.
#[derive(Clone)]
pub struct DieselMissionRepository {
    pool: DbPool,
}

impl DieselMissionRepository {
    /// Wrap a connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a validated domain mission.
fn row_to_mission(row: MissionRow) -> Result<Mission, MissionRepositoryError> {
    let MissionRow {
        id,
        group_id,
        author_id,
        assignee_id,
        description,
        deadline,
        status,
        done,
        reminded_24,
        reminded_1,
        created_at: _,
    } = row;

    Mission::new(MissionDraft {
        id: MissionId::new(id),
        group: GroupId::new(group_id),
        author: MemberId::new(author_id),
        assignee: MemberId::new(assignee_id),
        description,
        deadline,
        status,
        done,
        reminded_24,
        reminded_1,
    })
    .map_err(|err| MissionRepositoryError::query(format!("invalid mission row {id}: {err}")))
}

fn rows_to_missions(rows: Vec<MissionRow>) -> Result<Vec<Mission>, MissionRepositoryError> {
    rows.into_iter().map(row_to_mission).collect()
}

#[async_trait]
impl MissionRepository for DieselMissionRepository {
    async fn create(&self, mission: &NewMission) -> Result<MissionId, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewMissionRow {
            group_id: mission.group.get(),
            author_id: mission.author.get(),
            assignee_id: mission.assignee.get(),
            description: mission.description.as_ref(),
            deadline: mission.deadline,
        };

        diesel::insert_into(missions::table)
            .values(&row)
            .returning(missions::id)
            .get_result::<i64>(&mut conn)
            .await
            .map(MissionId::new)
            .map_err(map_diesel_error)
    }

    async fn list_by_group(
        &self,
        group: GroupId,
        filter: MissionFilter,
    ) -> Result<Vec<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query: missions::BoxedQuery<'_, Pg> = missions::table
            .filter(missions::group_id.eq(group.get()))
            .into_boxed();
        query = match filter {
            MissionFilter::Open => query.filter(missions::done.eq(false)),
            MissionFilter::Done => query.filter(missions::done.eq(true)),
            MissionFilter::All => query,
        };

        let rows: Vec<MissionRow> = query
            .order(missions::id.asc())
            .select(MissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_missions(rows)
    }

    async fn find(
        &self,
        id: MissionId,
        group: GroupId,
    ) -> Result<Option<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MissionRow> = missions::table
            .filter(missions::id.eq(id.get()))
            .filter(missions::group_id.eq(group.get()))
            .select(MissionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_mission).transpose()
    }

    async fn mark_done(
        &self,
        id: MissionId,
        group: GroupId,
    ) -> Result<bool, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            missions::table
                .filter(missions::id.eq(id.get()))
                .filter(missions::group_id.eq(group.get())),
        )
        .set(missions::done.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn set_status(
        &self,
        id: MissionId,
        group: GroupId,
        status: &MissionStatus,
    ) -> Result<bool, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            missions::table
                .filter(missions::id.eq(id.get()))
                .filter(missions::group_id.eq(group.get()))
                .filter(missions::done.eq(false)),
        )
        .set(missions::status.eq(status.as_ref()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn is_open(&self, id: MissionId) -> Result<bool, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            missions::table
                .filter(missions::id.eq(id.get()))
                .filter(missions::done.eq(false)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn mark_reminded(
        &self,
        id: MissionId,
        threshold: ReminderThreshold,
    ) -> Result<bool, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = missions::table
            .filter(missions::id.eq(id.get()))
            .filter(missions::done.eq(false));
        let updated = match threshold {
            ReminderThreshold::OneHour => {
                diesel::update(target.filter(missions::reminded_1.eq(false)))
                    .set(missions::reminded_1.eq(true))
                    .execute(&mut conn)
                    .await
            }
            ReminderThreshold::TwentyFourHours => {
                diesel::update(target.filter(missions::reminded_24.eq(false)))
                    .set(missions::reminded_24.eq(true))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn list_open_dated(&self) -> Result<Vec<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MissionRow> = missions::table
            .filter(missions::done.eq(false))
            .filter(missions::deadline.is_not_null())
            .order(missions::id.asc())
            .select(MissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_missions(rows)
    }

    async fn list_open(&self) -> Result<Vec<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MissionRow> = missions::table
            .filter(missions::done.eq(false))
            .order(missions::id.asc())
            .select(MissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_missions(rows)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; SQL paths run in `tests/diesel_mission_repository.rs`.

    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn row() -> MissionRow {
        let created_at = Utc
            .with_ymd_and_hms(2026, 1, 5, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        MissionRow {
            id: 12,
            group_id: 3,
            author_id: 4,
            assignee_id: 5,
            description: "Migrate the wiki".to_owned(),
            deadline: Some(created_at),
            status: "in progress".to_owned(),
            done: false,
            reminded_24: true,
            reminded_1: false,
            created_at,
        }
    }

    #[rstest]
    fn row_maps_to_domain_mission(row: MissionRow) {
        let mission = row_to_mission(row).expect("valid row");

        assert_eq!(mission.id(), MissionId::new(12));
        assert_eq!(mission.group(), GroupId::new(3));
        assert_eq!(mission.assignee(), MemberId::new(5));
        assert!(mission.reminded_24());
        assert!(!mission.reminded_1());
    }

    #[rstest]
    fn blank_description_row_is_query_error(mut row: MissionRow) {
        row.description = "  ".to_owned();
        let err = row_to_mission(row).expect_err("invalid row");
        assert!(matches!(err, MissionRepositoryError::Query { .. }));
        assert!(err.to_string().contains("invalid mission row 12"));
    }
}
