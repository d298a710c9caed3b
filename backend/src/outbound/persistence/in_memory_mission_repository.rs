//! Process-local `MissionRepository` used when no database is configured.
//!
//! A single mutex serializes every operation, which gives the same atomic
//! single-row check-and-set semantics as the SQL adapter. State is lost on
//! restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{MissionRepository, MissionRepositoryError};
use crate::domain::{
    DEFAULT_STATUS, GroupId, MemberId, Mission, MissionDraft, MissionFilter, MissionId,
    MissionStatus, NewMission, ReminderThreshold,
};

#[derive(Debug, Clone)]
struct StoredMission {
    group: GroupId,
    author: MemberId,
    assignee: MemberId,
    description: String,
    deadline: Option<DateTime<Utc>>,
    status: String,
    done: bool,
    reminded_24: bool,
    reminded_1: bool,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<MissionId, StoredMission>,
}

/// In-memory implementation of the mission repository port.
#[derive(Debug, Default)]
pub struct InMemoryMissionRepository {
    state: Mutex<State>,
}

impl InMemoryMissionRepository {
    /// Empty store; ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, MissionRepositoryError> {
        self.state
            .lock()
            .map_err(|_| MissionRepositoryError::connection("in-memory store poisoned"))
    }
}

fn to_mission(id: MissionId, row: &StoredMission) -> Result<Mission, MissionRepositoryError> {
    Mission::new(MissionDraft {
        id,
        group: row.group,
        author: row.author,
        assignee: row.assignee,
        description: row.description.clone(),
        deadline: row.deadline,
        status: row.status.clone(),
        done: row.done,
        reminded_24: row.reminded_24,
        reminded_1: row.reminded_1,
    })
    .map_err(|err| MissionRepositoryError::query(err.to_string()))
}

fn collect<'a>(
    rows: impl Iterator<Item = (&'a MissionId, &'a StoredMission)>,
) -> Result<Vec<Mission>, MissionRepositoryError> {
    rows.map(|(id, row)| to_mission(*id, row)).collect()
}

#[async_trait]
impl MissionRepository for InMemoryMissionRepository {
    async fn create(&self, mission: &NewMission) -> Result<MissionId, MissionRepositoryError> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = MissionId::new(state.last_id);
        state.rows.insert(
            id,
            StoredMission {
                group: mission.group,
                author: mission.author,
                assignee: mission.assignee,
                description: mission.description.to_string(),
                deadline: mission.deadline,
                status: DEFAULT_STATUS.to_owned(),
                done: false,
                reminded_24: false,
                reminded_1: false,
            },
        );
        Ok(id)
    }

    async fn list_by_group(
        &self,
        group: GroupId,
        filter: MissionFilter,
    ) -> Result<Vec<Mission>, MissionRepositoryError> {
        let state = self.lock()?;
        collect(
            state
                .rows
                .iter()
                .filter(|(_, row)| row.group == group && filter.admits(row.done)),
        )
    }

    async fn find(
        &self,
        id: MissionId,
        group: GroupId,
    ) -> Result<Option<Mission>, MissionRepositoryError> {
        let state = self.lock()?;
        state
            .rows
            .get(&id)
            .filter(|row| row.group == group)
            .map(|row| to_mission(id, row))
            .transpose()
    }

    async fn mark_done(
        &self,
        id: MissionId,
        group: GroupId,
    ) -> Result<bool, MissionRepositoryError> {
        let mut state = self.lock()?;
        match state.rows.get_mut(&id).filter(|row| row.group == group) {
            Some(row) => {
                row.done = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(
        &self,
        id: MissionId,
        group: GroupId,
        status: &MissionStatus,
    ) -> Result<bool, MissionRepositoryError> {
        let mut state = self.lock()?;
        match state
            .rows
            .get_mut(&id)
            .filter(|row| row.group == group && !row.done)
        {
            Some(row) => {
                row.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_open(&self, id: MissionId) -> Result<bool, MissionRepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.get(&id).is_some_and(|row| !row.done))
    }

    async fn mark_reminded(
        &self,
        id: MissionId,
        threshold: ReminderThreshold,
    ) -> Result<bool, MissionRepositoryError> {
        let mut state = self.lock()?;
        let Some(row) = state.rows.get_mut(&id).filter(|row| !row.done) else {
            return Ok(false);
        };
        let flag = match threshold {
            ReminderThreshold::OneHour => &mut row.reminded_1,
            ReminderThreshold::TwentyFourHours => &mut row.reminded_24,
        };
        if *flag {
            return Ok(false);
        }
        *flag = true;
        Ok(true)
    }

    async fn list_open_dated(&self) -> Result<Vec<Mission>, MissionRepositoryError> {
        let state = self.lock()?;
        collect(
            state
                .rows
                .iter()
                .filter(|(_, row)| !row.done && row.deadline.is_some()),
        )
    }

    async fn list_open(&self) -> Result<Vec<Mission>, MissionRepositoryError> {
        let state = self.lock()?;
        collect(state.rows.iter().filter(|(_, row)| !row.done))
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage shared in spirit with the SQL adapter.

    use chrono::TimeDelta;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::MissionDescription;
    use crate::test_support::epoch;

    fn new_mission(group: i64, deadline: Option<DateTime<Utc>>) -> NewMission {
        NewMission {
            group: GroupId::new(group),
            author: MemberId::new(1),
            assignee: MemberId::new(2),
            description: MissionDescription::new("Draft the agenda").expect("valid description"),
            deadline,
        }
    }

    #[fixture]
    fn repo() -> InMemoryMissionRepository {
        InMemoryMissionRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_monotonically(repo: InMemoryMissionRepository) {
        let first = repo.create(&new_mission(1, None)).await.expect("create");
        let second = repo.create(&new_mission(2, None)).await.expect("create");
        assert!(second > first);
    }

    #[rstest]
    #[tokio::test]
    async fn created_missions_default_to_in_progress(repo: InMemoryMissionRepository) {
        let id = repo.create(&new_mission(1, None)).await.expect("create");
        let mission = repo
            .find(id, GroupId::new(1))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(mission.status().as_ref(), DEFAULT_STATUS);
        assert!(!mission.is_done());
    }

    #[rstest]
    #[tokio::test]
    async fn group_scope_hides_other_groups(repo: InMemoryMissionRepository) {
        let id = repo.create(&new_mission(1, None)).await.expect("create");

        assert!(repo.find(id, GroupId::new(2)).await.expect("find").is_none());
        assert!(!repo.mark_done(id, GroupId::new(2)).await.expect("mark"));
        let status = MissionStatus::new("hijacked").expect("valid status");
        assert!(
            !repo
                .set_status(id, GroupId::new(2), &status)
                .await
                .expect("set")
        );
        assert!(
            repo.list_by_group(GroupId::new(2), MissionFilter::All)
                .await
                .expect("list")
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn filters_split_open_and_done(repo: InMemoryMissionRepository) {
        let open = repo.create(&new_mission(1, None)).await.expect("create");
        let done = repo.create(&new_mission(1, None)).await.expect("create");
        repo.mark_done(done, GroupId::new(1)).await.expect("mark");

        let ids = |missions: Vec<Mission>| missions.iter().map(Mission::id).collect::<Vec<_>>();
        let group = GroupId::new(1);
        assert_eq!(
            ids(repo.list_by_group(group, MissionFilter::Open).await.expect("list")),
            vec![open]
        );
        assert_eq!(
            ids(repo.list_by_group(group, MissionFilter::Done).await.expect("list")),
            vec![done]
        );
        assert_eq!(
            ids(repo.list_by_group(group, MissionFilter::All).await.expect("list")),
            vec![open, done]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn status_cannot_change_after_completion(repo: InMemoryMissionRepository) {
        let id = repo.create(&new_mission(1, None)).await.expect("create");
        repo.mark_done(id, GroupId::new(1)).await.expect("mark");

        let status = MissionStatus::new("reopened").expect("valid status");
        assert!(
            !repo
                .set_status(id, GroupId::new(1), &status)
                .await
                .expect("set")
        );
    }

    #[rstest]
    #[case(ReminderThreshold::OneHour)]
    #[case(ReminderThreshold::TwentyFourHours)]
    #[tokio::test]
    async fn reminder_flags_flip_exactly_once(
        repo: InMemoryMissionRepository,
        #[case] threshold: ReminderThreshold,
    ) {
        let id = repo
            .create(&new_mission(1, Some(epoch() + TimeDelta::hours(2))))
            .await
            .expect("create");

        assert!(repo.mark_reminded(id, threshold).await.expect("first flip"));
        assert!(!repo.mark_reminded(id, threshold).await.expect("second flip"));

        let mission = repo
            .find(id, GroupId::new(1))
            .await
            .expect("find")
            .expect("present");
        assert!(mission.has_fired(threshold));
    }

    #[rstest]
    #[tokio::test]
    async fn completed_missions_are_closed_and_never_flagged(repo: InMemoryMissionRepository) {
        let id = repo
            .create(&new_mission(1, Some(epoch() + TimeDelta::minutes(30))))
            .await
            .expect("create");
        assert!(repo.is_open(id).await.expect("open check"));

        repo.mark_done(id, GroupId::new(1)).await.expect("mark");

        assert!(!repo.is_open(id).await.expect("open check"));
        assert!(
            !repo
                .mark_reminded(id, ReminderThreshold::OneHour)
                .await
                .expect("flip")
        );
        let mission = repo
            .find(id, GroupId::new(1))
            .await
            .expect("find")
            .expect("present");
        assert!(!mission.reminded_1());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_missions_read_as_closed(repo: InMemoryMissionRepository) {
        assert!(!repo.is_open(MissionId::new(404)).await.expect("open check"));
    }

    #[rstest]
    #[tokio::test]
    async fn open_dated_scan_spans_groups(repo: InMemoryMissionRepository) {
        let dated = repo
            .create(&new_mission(1, Some(epoch())))
            .await
            .expect("create");
        repo.create(&new_mission(1, None)).await.expect("create");
        let other_group = repo
            .create(&new_mission(2, Some(epoch())))
            .await
            .expect("create");

        let scanned: Vec<_> = repo
            .list_open_dated()
            .await
            .expect("scan")
            .iter()
            .map(Mission::id)
            .collect();
        assert_eq!(scanned, vec![dated, other_group]);
        assert_eq!(repo.list_open().await.expect("scan").len(), 3);
    }
}
