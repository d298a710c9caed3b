//! Port for durable mission storage.
//!
//! Every group-scoped call takes the group as an explicit argument and
//! adapters must include it in their predicate, so a mission id from one
//! group can never address a row in another. The open check and the reminder
//! flag write are keyed by id alone; only the engine drives them, with ids it
//! just read.

use async_trait::async_trait;

use crate::domain::{
    GroupId, Mission, MissionFilter, MissionId, MissionStatus, NewMission, ReminderThreshold,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mission repository adapters.
    pub enum MissionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "mission repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "mission repository query failed: {message}",
    }
}

/// Persistence contract for missions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Insert a mission and return its freshly assigned id.
    async fn create(&self, mission: &NewMission) -> Result<MissionId, MissionRepositoryError>;

    /// Missions of one group passing `filter`, ordered by id ascending.
    async fn list_by_group(
        &self,
        group: GroupId,
        filter: MissionFilter,
    ) -> Result<Vec<Mission>, MissionRepositoryError>;

    /// Look up one mission within its group.
    async fn find(
        &self,
        id: MissionId,
        group: GroupId,
    ) -> Result<Option<Mission>, MissionRepositoryError>;

    /// Set `done = true`. Returns `false` when no such mission exists in the
    /// group; completing an already completed mission returns `true`.
    async fn mark_done(&self, id: MissionId, group: GroupId)
    -> Result<bool, MissionRepositoryError>;

    /// Overwrite the status of an open mission. Returns `false` when the
    /// mission is missing or already done.
    async fn set_status(
        &self,
        id: MissionId,
        group: GroupId,
        status: &MissionStatus,
    ) -> Result<bool, MissionRepositoryError>;

    /// Whether the mission exists and is not done. Re-read by the engine
    /// immediately before each notice.
    async fn is_open(&self, id: MissionId) -> Result<bool, MissionRepositoryError>;

    /// Compare-and-set the reminder flag for `threshold` from `false` to
    /// `true` on an open mission. Returns whether this call performed the
    /// transition; a done mission is never flagged.
    async fn mark_reminded(
        &self,
        id: MissionId,
        threshold: ReminderThreshold,
    ) -> Result<bool, MissionRepositoryError>;

    /// Every open mission with a deadline, across all groups, ordered by id.
    async fn list_open_dated(&self) -> Result<Vec<Mission>, MissionRepositoryError>;

    /// Every open mission across all groups, ordered by id.
    async fn list_open(&self) -> Result<Vec<Mission>, MissionRepositoryError>;
}
