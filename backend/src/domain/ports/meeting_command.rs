//! Driving ports for the meeting passthrough.

use async_trait::async_trait;

use crate::domain::{Error, GroupId, Meeting, Member};

/// Request to schedule a one-hour meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMeetingRequest {
    pub caller: Member,
    pub group: GroupId,
    pub subject: String,
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    /// `HH:MM`, UTC.
    pub time: String,
    pub voice_channel: String,
}

/// Driving port for publishing meetings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingCommand: Send + Sync {
    async fn schedule_meeting(&self, request: ScheduleMeetingRequest) -> Result<Meeting, Error>;
}

/// Driving port for reading a group's meetings ordered by start time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingQuery: Send + Sync {
    async fn list_meetings(&self, group: GroupId) -> Result<Vec<Meeting>, Error>;
}
