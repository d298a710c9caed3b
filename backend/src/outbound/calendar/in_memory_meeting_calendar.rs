//! Process-local meeting calendar.
//!
//! Stands in for the chat host's scheduled-event API when none is wired up.
//! Event ids are random UUIDs, matching the opaque ids real hosts return.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{MeetingCalendar, MeetingCalendarError};
use crate::domain::{GroupId, Meeting, MeetingDraft};

/// In-memory implementation of the meeting calendar port.
#[derive(Debug, Default)]
pub struct InMemoryMeetingCalendar {
    meetings: Mutex<Vec<Meeting>>,
}

impl InMemoryMeetingCalendar {
    /// Empty calendar.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingCalendar for InMemoryMeetingCalendar {
    async fn create(&self, draft: &MeetingDraft) -> Result<Meeting, MeetingCalendarError> {
        let meeting = Meeting {
            id: Uuid::new_v4().to_string(),
            details: draft.clone(),
        };
        self.meetings
            .lock()
            .map_err(|_| MeetingCalendarError::connection("calendar store poisoned"))?
            .push(meeting.clone());
        Ok(meeting)
    }

    async fn list(&self, group: GroupId) -> Result<Vec<Meeting>, MeetingCalendarError> {
        let meetings = self
            .meetings
            .lock()
            .map_err(|_| MeetingCalendarError::connection("calendar store poisoned"))?;
        Ok(meetings
            .iter()
            .filter(|meeting| meeting.details.group == group)
            .cloned()
            .collect())
    }
}
