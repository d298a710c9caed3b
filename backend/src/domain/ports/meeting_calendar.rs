//! Port for the external calendar that publishes meetings.

use async_trait::async_trait;

use crate::domain::{GroupId, Meeting, MeetingDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calendar adapters.
    pub enum MeetingCalendarError {
        /// Calendar could not be reached.
        Connection { message: String } => "meeting calendar unreachable: {message}",
        /// Calendar refused the event.
        Rejected { message: String } => "meeting calendar rejected event: {message}",
    }
}

/// Scheduled-event passthrough.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetingCalendar: Send + Sync {
    /// Publish a meeting and return it with the calendar's event id.
    async fn create(&self, draft: &MeetingDraft) -> Result<Meeting, MeetingCalendarError>;

    /// Meetings published for a group, in any order.
    async fn list(&self, group: GroupId) -> Result<Vec<Meeting>, MeetingCalendarError>;
}
