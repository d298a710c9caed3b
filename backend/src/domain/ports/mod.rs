//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod meeting_calendar;
mod meeting_command;
mod mission_command;
mod mission_query;
mod mission_repository;
mod notifier;

#[cfg(test)]
pub use meeting_calendar::MockMeetingCalendar;
pub use meeting_calendar::{MeetingCalendar, MeetingCalendarError};
#[cfg(test)]
pub use meeting_command::{MockMeetingCommand, MockMeetingQuery};
pub use meeting_command::{MeetingCommand, MeetingQuery, ScheduleMeetingRequest};
#[cfg(test)]
pub use mission_command::MockMissionCommand;
pub use mission_command::{
    AddMissionRequest, AddMissionResponse, CompleteMissionRequest, MissionCommand,
    UpdateStatusRequest,
};
#[cfg(test)]
pub use mission_query::MockMissionQuery;
pub use mission_query::{ListMissionsRequest, ListMissionsResponse, MissionQuery};
#[cfg(test)]
pub use mission_repository::MockMissionRepository;
pub use mission_repository::{MissionRepository, MissionRepositoryError};
#[cfg(test)]
pub use notifier::{MockChannelNotifier, MockMemberNotifier};
pub use notifier::{
    ChannelNotifier, DeliveryOutcome, FixtureNotifier, MemberNotifier, NotifierError,
};
