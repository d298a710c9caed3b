//! Meeting HTTP handlers.
//!
//! ```text
//! POST /api/v1/groups/{group}/meetings
//! GET  /api/v1/groups/{group}/meetings
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::GroupId;
use crate::domain::ports::ScheduleMeetingRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::caller::CallerContext;
use crate::inbound::http::state::HttpState;

/// Request payload for scheduling a meeting; date is `YYYY-MM-DD`, time `HH:MM` UTC.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMeetingBody {
    pub subject: String,
    pub date: String,
    pub time: String,
    pub voice_channel: String,
}

#[post("/groups/{group}/meetings")]
pub async fn schedule_meeting(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<i64>,
    payload: web::Json<ScheduleMeetingBody>,
) -> ApiResult<HttpResponse> {
    let ScheduleMeetingBody {
        subject,
        date,
        time,
        voice_channel,
    } = payload.into_inner();
    let meeting = state
        .meetings
        .schedule_meeting(ScheduleMeetingRequest {
            caller: caller.into_member(),
            group: GroupId::new(path.into_inner()),
            subject,
            date,
            time,
            voice_channel,
        })
        .await?;
    Ok(HttpResponse::Created().json(meeting))
}

#[get("/groups/{group}/meetings")]
pub async fn list_meetings(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let meetings = state
        .meetings_query
        .list_meetings(GroupId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(meetings))
}
