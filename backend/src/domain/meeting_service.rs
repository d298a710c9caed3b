//! Meeting passthrough service.
//!
//! Validates the request and forwards it to the external calendar. Meetings
//! are not stored locally.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    MeetingCalendar, MeetingCalendarError, MeetingCommand, MeetingQuery, ScheduleMeetingRequest,
};
use crate::domain::{
    AccessPolicy, DeadlineError, Error, GroupId, Meeting, MeetingDraft, parse_meeting_start,
};

fn map_calendar_error(error: MeetingCalendarError) -> Error {
    match error {
        MeetingCalendarError::Connection { message } => {
            Error::unavailable(format!("meeting calendar unavailable: {message}"))
        }
        MeetingCalendarError::Rejected { message } => {
            Error::invalid_input(format!("meeting calendar rejected the event: {message}"))
        }
    }
}

fn map_start_error(error: DeadlineError) -> Error {
    let field = match error {
        DeadlineError::BadTime { .. } => "time",
        _ => "date",
    };
    Error::invalid_input(error.to_string()).with_details(json!({ "field": field }))
}

/// Service implementing [`MeetingCommand`] and [`MeetingQuery`].
#[derive(Clone)]
pub struct MeetingService<C: ?Sized> {
    calendar: Arc<C>,
    policy: Arc<AccessPolicy>,
}

impl<C: ?Sized> MeetingService<C> {
    /// Create a service over the calendar port.
    pub fn new(calendar: Arc<C>, policy: Arc<AccessPolicy>) -> Self {
        Self { calendar, policy }
    }
}

#[async_trait]
impl<C> MeetingCommand for MeetingService<C>
where
    C: MeetingCalendar + ?Sized,
{
    async fn schedule_meeting(&self, request: ScheduleMeetingRequest) -> Result<Meeting, Error> {
        if !self.policy.is_authorized(&request.caller.roles) {
            return Err(Error::forbidden("you are not allowed to schedule meetings"));
        }

        let subject = request.subject.trim();
        if subject.is_empty() {
            return Err(Error::invalid_input("meeting subject must not be empty")
                .with_details(json!({ "field": "subject" })));
        }
        let start = parse_meeting_start(&request.date, &request.time).map_err(map_start_error)?;

        let draft = MeetingDraft::new(
            request.group,
            subject,
            start,
            request.voice_channel.trim(),
            request.caller.id,
        );
        let meeting = self
            .calendar
            .create(&draft)
            .await
            .map_err(map_calendar_error)?;

        info!(
            meeting_id = %meeting.id,
            group = %meeting.details.group,
            start = %meeting.details.start,
            "meeting scheduled"
        );
        Ok(meeting)
    }
}

#[async_trait]
impl<C> MeetingQuery for MeetingService<C>
where
    C: MeetingCalendar + ?Sized,
{
    async fn list_meetings(&self, group: GroupId) -> Result<Vec<Meeting>, Error> {
        let mut meetings = self
            .calendar
            .list(group)
            .await
            .map_err(map_calendar_error)?;
        meetings.sort_by(|a, b| {
            a.details
                .start
                .cmp(&b.details.start)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(meetings)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{TimeDelta, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockMeetingCalendar;
    use crate::domain::{ErrorCode, Member, MemberId, RoleId};

    fn service(calendar: MockMeetingCalendar) -> MeetingService<MockMeetingCalendar> {
        MeetingService::new(
            Arc::new(calendar),
            Arc::new(AccessPolicy::new([RoleId::new(10)], None)),
        )
    }

    fn request(roles: &[i64], subject: &str, date: &str, time: &str) -> ScheduleMeetingRequest {
        ScheduleMeetingRequest {
            caller: Member::new(MemberId::new(4), roles.iter().copied().map(RoleId::new)),
            group: GroupId::new(1),
            subject: subject.to_owned(),
            date: date.to_owned(),
            time: time.to_owned(),
            voice_channel: "standup".to_owned(),
        }
    }

    fn stored(id: &str, hour: u32) -> Meeting {
        let start = Utc
            .with_ymd_and_hms(2026, 6, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp");
        Meeting {
            id: id.to_owned(),
            details: MeetingDraft::new(GroupId::new(1), id, start, "standup", MemberId::new(4)),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn schedule_forwards_one_hour_draft() {
        let mut calendar = MockMeetingCalendar::new();
        calendar
            .expect_create()
            .withf(|draft| {
                draft.subject == "Sprint review"
                    && draft.end - draft.start == TimeDelta::hours(1)
                    && draft.description == "Scheduled by 4"
            })
            .times(1)
            .return_once(|draft| {
                Ok(Meeting {
                    id: "evt-1".to_owned(),
                    details: draft.clone(),
                })
            });

        let meeting = service(calendar)
            .schedule_meeting(request(&[10], " Sprint review ", "2026-06-10", "18:00"))
            .await
            .expect("meeting scheduled");

        assert_eq!(meeting.id, "evt-1");
    }

    #[rstest]
    #[case::unauthorized(&[], "Review", "2026-06-10", "18:00", ErrorCode::Forbidden)]
    #[case::blank_subject(&[10], "  ", "2026-06-10", "18:00", ErrorCode::InvalidInput)]
    #[case::bad_date(&[10], "Review", "June 10", "18:00", ErrorCode::InvalidInput)]
    #[case::bad_time(&[10], "Review", "2026-06-10", "25:00", ErrorCode::InvalidInput)]
    #[tokio::test]
    async fn schedule_rejects_without_calling_calendar(
        #[case] roles: &[i64],
        #[case] subject: &str,
        #[case] date: &str,
        #[case] time: &str,
        #[case] expected: ErrorCode,
    ) {
        let mut calendar = MockMeetingCalendar::new();
        calendar.expect_create().times(0);

        let err = service(calendar)
            .schedule_meeting(request(roles, subject, date, time))
            .await
            .expect_err("rejected");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn schedule_maps_connection_error_to_unavailable() {
        let mut calendar = MockMeetingCalendar::new();
        calendar
            .expect_create()
            .times(1)
            .return_once(|_| Err(MeetingCalendarError::connection("timeout")));

        let err = service(calendar)
            .schedule_meeting(request(&[10], "Review", "2026-06-10", "18:00"))
            .await
            .expect_err("unavailable");

        assert_eq!(err.code(), ErrorCode::Unavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_by_start() {
        let mut calendar = MockMeetingCalendar::new();
        calendar
            .expect_list()
            .times(1)
            .return_once(|_| Ok(vec![stored("late", 20), stored("early", 8)]));

        let meetings = service(calendar)
            .list_meetings(GroupId::new(1))
            .await
            .expect("listing succeeds");

        let ids: Vec<_> = meetings.iter().map(|meeting| meeting.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
