//! Meeting calendar adapters.

mod in_memory_meeting_calendar;

pub use in_memory_meeting_calendar::InMemoryMeetingCalendar;
