//! Mission HTTP handlers.
//!
//! ```text
//! POST /api/v1/groups/{group}/missions                 AddMission
//! GET  /api/v1/groups/{group}/missions                 ListMissions
//! POST /api/v1/groups/{group}/missions/{id}/complete   CompleteMission
//! PUT  /api/v1/groups/{group}/missions/{id}/status     UpdateStatus
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, put, web};
use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageEnvelope, PagedView};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{
    AddMissionRequest, CompleteMissionRequest, ListMissionsRequest, UpdateStatusRequest,
};
use crate::domain::{
    Error, GroupId, Member, MemberId, Mission, MissionFilter, MissionId, RoleId, render_listing,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::CallerContext;
use crate::inbound::http::state::HttpState;

/// Request payload for creating a mission.
///
/// The host resolves the assignee's roles; they are needed to enforce the
/// blocked-receiver rule, so `assigneeRoles` is required even when empty.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMissionBody {
    pub assignee_id: MemberId,
    pub assignee_roles: Vec<RoleId>,
    pub description: String,
    #[serde(default)]
    pub deadline: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddMissionReply {
    mission_id: MissionId,
}

/// Request payload for replacing a mission's status label.
#[derive(Debug, Deserialize, Serialize)]
pub struct StatusBody {
    pub status: String,
}

/// Listing query string: `?filter=open&page=0&pageSize=20`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub filter: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Listing reply: the JSON page plus the rendered text listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingReply {
    #[serde(flatten)]
    page: PageEnvelope<Mission>,
    text: String,
}

fn parse_filter(raw: Option<&str>) -> Result<MissionFilter, Error> {
    raw.map_or(Ok(MissionFilter::default()), |value| {
        MissionFilter::from_str(value).map_err(|err| {
            Error::invalid_input(err.to_string()).with_details(json!({ "field": "filter" }))
        })
    })
}

/// Build the page snapshot. Out-of-range pages and sizes are clamped.
fn build_view(missions: Vec<Mission>, query: &ListQuery) -> Result<PagedView<Mission>, Error> {
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE.get())
        .clamp(1, MAX_PAGE_SIZE);
    let mut view = PagedView::new(missions, page_size)
        .map_err(|err| Error::invalid_input(err.to_string()))?;
    view.seek(query.page.unwrap_or(0));
    Ok(view)
}

/// Create a mission in the group.
#[post("/groups/{group}/missions")]
pub async fn add_mission(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<i64>,
    payload: web::Json<AddMissionBody>,
) -> ApiResult<HttpResponse> {
    let AddMissionBody {
        assignee_id,
        assignee_roles,
        description,
        deadline,
    } = payload.into_inner();
    let request = AddMissionRequest {
        caller: caller.into_member(),
        group: GroupId::new(path.into_inner()),
        assignee: Member::new(assignee_id, assignee_roles),
        description,
        deadline,
    };
    let response = state.missions.add_mission(request).await?;
    Ok(HttpResponse::Created().json(AddMissionReply {
        mission_id: response.mission_id,
    }))
}

/// List the group's missions as one page of a snapshot.
#[get("/groups/{group}/missions")]
pub async fn list_missions(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let filter = parse_filter(query.filter.as_deref())?;
    let response = state
        .missions_query
        .list_missions(ListMissionsRequest {
            group: GroupId::new(path.into_inner()),
            filter,
        })
        .await?;
    let view = build_view(response.missions, &query)?;
    Ok(HttpResponse::Ok().json(ListingReply {
        page: view.envelope(Mission::clone),
        text: render_listing(&view),
    }))
}

/// Mark a mission done.
#[post("/groups/{group}/missions/{id}/complete")]
pub async fn complete_mission(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (group, id) = path.into_inner();
    state
        .missions
        .complete_mission(CompleteMissionRequest {
            caller: caller.into_member(),
            group: GroupId::new(group),
            mission_id: MissionId::new(id),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the status label; only the assignee may do this.
#[put("/groups/{group}/missions/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<(i64, i64)>,
    payload: web::Json<StatusBody>,
) -> ApiResult<HttpResponse> {
    let (group, id) = path.into_inner();
    state
        .missions
        .update_status(UpdateStatusRequest {
            caller: caller.into_member(),
            group: GroupId::new(group),
            mission_id: MissionId::new(id),
            status: payload.into_inner().status,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "missions_tests.rs"]
mod tests;
