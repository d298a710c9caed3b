//! Scheduled meetings published through the external calendar.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{GroupId, MemberId};

/// Fixed meeting length.
pub const MEETING_DURATION: TimeDelta = TimeDelta::hours(1);

/// Meeting ready to be published; `end` is always `start + MEETING_DURATION`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDraft {
    pub group: GroupId,
    pub subject: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub voice_channel: String,
}

impl MeetingDraft {
    /// Build a one-hour meeting credited to `organiser`.
    pub fn new(
        group: GroupId,
        subject: impl Into<String>,
        start: DateTime<Utc>,
        voice_channel: impl Into<String>,
        organiser: MemberId,
    ) -> Self {
        Self {
            group,
            subject: subject.into(),
            description: format!("Scheduled by {organiser}"),
            start,
            end: start + MEETING_DURATION,
            voice_channel: voice_channel.into(),
        }
    }
}

/// Meeting as stored by the calendar, identified by the calendar's event id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    #[serde(flatten)]
    pub details: MeetingDraft,
}
