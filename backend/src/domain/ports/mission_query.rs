//! Driving port for mission reads.

use async_trait::async_trait;

use crate::domain::{Error, GroupId, Mission, MissionFilter};

/// Request for a group's missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMissionsRequest {
    pub group: GroupId,
    pub filter: MissionFilter,
}

/// Missions ordered by id ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMissionsResponse {
    pub missions: Vec<Mission>,
}

/// Driving port for mission read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionQuery: Send + Sync {
    async fn list_missions(
        &self,
        request: ListMissionsRequest,
    ) -> Result<ListMissionsResponse, Error>;
}
