//! Driving port for mission mutations.
//!
//! Callers arrive already authenticated; the port receives their identity and
//! role set and decides authorization itself.

use async_trait::async_trait;

use crate::domain::{Error, GroupId, Member, MissionId};

/// Request to create a mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMissionRequest {
    pub caller: Member,
    pub group: GroupId,
    pub assignee: Member,
    pub description: String,
    /// Raw deadline text; `None` or blank means no deadline.
    pub deadline: Option<String>,
}

/// Identifier assigned to a newly created mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddMissionResponse {
    pub mission_id: MissionId,
}

/// Request to mark a mission done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteMissionRequest {
    pub caller: Member,
    pub group: GroupId,
    pub mission_id: MissionId,
}

/// Request to overwrite a mission's status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    pub caller: Member,
    pub group: GroupId,
    pub mission_id: MissionId,
    pub status: String,
}

/// Driving port for mission write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionCommand: Send + Sync {
    /// Create a mission.
    ///
    /// Fails `Forbidden` when the caller lacks an allow-listed role or the
    /// assignee holds the blocked receiver role, and `InvalidInput` for a
    /// blank description or an unparsable or past deadline.
    async fn add_mission(&self, request: AddMissionRequest) -> Result<AddMissionResponse, Error>;

    /// Mark a mission done. Completing twice succeeds both times.
    async fn complete_mission(&self, request: CompleteMissionRequest) -> Result<(), Error>;

    /// Replace the status label. Only the assignee may do this.
    async fn update_status(&self, request: UpdateStatusRequest) -> Result<(), Error>;
}
