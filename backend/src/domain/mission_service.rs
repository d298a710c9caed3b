//! Mission domain service.
//!
//! Implements the mission driving ports on top of the repository. Every
//! mutating operation checks authorization first, then ownership, then input,
//! and only then touches the store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AddMissionRequest, AddMissionResponse, CompleteMissionRequest, ListMissionsRequest,
    ListMissionsResponse, MissionCommand, MissionQuery, MissionRepository, MissionRepositoryError,
    UpdateStatusRequest,
};
use crate::domain::{
    AccessPolicy, Error, MissionDescription, MissionId, MissionStatus, NewMission, ensure_future,
    parse_deadline,
};

fn map_repository_error(error: MissionRepositoryError) -> Error {
    match error {
        MissionRepositoryError::Connection { message } => {
            Error::unavailable(format!("mission repository unavailable: {message}"))
        }
        MissionRepositoryError::Query { message } => {
            Error::unavailable(format!("mission repository error: {message}"))
        }
    }
}

fn mission_not_found(id: MissionId) -> Error {
    Error::not_found(format!("mission {id} not found")).with_details(json!({
        "missionId": id,
    }))
}

/// Mission service implementing [`MissionCommand`] and [`MissionQuery`].
#[derive(Clone)]
pub struct MissionService<R: ?Sized> {
    missions: Arc<R>,
    policy: Arc<AccessPolicy>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> MissionService<R> {
    /// Create a service over the mission repository.
    pub fn new(missions: Arc<R>, policy: Arc<AccessPolicy>, clock: Arc<dyn Clock>) -> Self {
        Self {
            missions,
            policy,
            clock,
        }
    }

    fn parse_new_mission(&self, request: &AddMissionRequest) -> Result<NewMission, Error> {
        let description =
            MissionDescription::new(request.description.as_str()).map_err(|err| {
                Error::invalid_input(err.to_string())
                    .with_details(json!({ "field": "description" }))
            })?;

        let raw_deadline = request.deadline.as_deref().unwrap_or_default();
        let deadline = parse_deadline(raw_deadline)
            .and_then(|parsed| {
                parsed
                    .map(|deadline| ensure_future(deadline, self.clock.utc()))
                    .transpose()
            })
            .map_err(|err| {
                Error::invalid_input(err.to_string()).with_details(json!({ "field": "deadline" }))
            })?;

        Ok(NewMission {
            group: request.group,
            author: request.caller.id,
            assignee: request.assignee.id,
            description,
            deadline,
        })
    }
}

#[async_trait]
impl<R> MissionCommand for MissionService<R>
where
    R: MissionRepository + ?Sized,
{
    async fn add_mission(&self, request: AddMissionRequest) -> Result<AddMissionResponse, Error> {
        if !self.policy.is_authorized(&request.caller.roles) {
            return Err(Error::forbidden("you are not allowed to assign missions"));
        }
        if !self.policy.can_receive(&request.assignee.roles) {
            return Err(Error::forbidden(format!(
                "member {} cannot receive missions",
                request.assignee.id
            )));
        }

        let mission = self.parse_new_mission(&request)?;
        let mission_id = self
            .missions
            .create(&mission)
            .await
            .map_err(map_repository_error)?;

        info!(
            mission_id = %mission_id,
            group = %mission.group,
            assignee = %mission.assignee,
            "mission created"
        );
        Ok(AddMissionResponse { mission_id })
    }

    async fn complete_mission(&self, request: CompleteMissionRequest) -> Result<(), Error> {
        if !self.policy.is_authorized(&request.caller.roles) {
            return Err(Error::forbidden("you are not allowed to complete missions"));
        }

        let found = self
            .missions
            .mark_done(request.mission_id, request.group)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(mission_not_found(request.mission_id));
        }

        info!(mission_id = %request.mission_id, group = %request.group, "mission completed");
        Ok(())
    }

    async fn update_status(&self, request: UpdateStatusRequest) -> Result<(), Error> {
        let mission = self
            .missions
            .find(request.mission_id, request.group)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| mission_not_found(request.mission_id))?;

        if mission.assignee() != request.caller.id {
            return Err(Error::forbidden(
                "only the assignee may update this mission's status",
            ));
        }
        if mission.is_done() {
            return Err(Error::invalid_input("mission is already complete"));
        }

        let status = MissionStatus::new(request.status).map_err(|err| {
            Error::invalid_input(err.to_string()).with_details(json!({ "field": "status" }))
        })?;

        let updated = self
            .missions
            .set_status(request.mission_id, request.group, &status)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            // Completed between the read and the write.
            return Err(Error::invalid_input("mission is already complete"));
        }

        debug!(mission_id = %request.mission_id, status = %status, "mission status updated");
        Ok(())
    }
}

#[async_trait]
impl<R> MissionQuery for MissionService<R>
where
    R: MissionRepository + ?Sized,
{
    async fn list_missions(
        &self,
        request: ListMissionsRequest,
    ) -> Result<ListMissionsResponse, Error> {
        let missions = self
            .missions
            .list_by_group(request.group, request.filter)
            .await
            .map_err(map_repository_error)?;

        Ok(ListMissionsResponse { missions })
    }
}

#[cfg(test)]
#[path = "mission_service_tests.rs"]
mod tests;
