//! Domain primitives, services and the deadline notification engine.
//!
//! Purpose: hold the transport-agnostic core. Types validate their invariants
//! on construction; services reach storage and notification transports only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - Mission and its identifiers, filters and thresholds.
//! - AccessPolicy — the role-based authorization guard.
//! - MissionService / MeetingService — driving port implementations.
//! - DeadlineReminderEngine / ReminderScheduler — the notification engine.

pub mod access_policy;
pub mod deadline;
pub mod deadline_reminders;
pub mod error;
pub mod listing;
pub mod meeting;
pub mod meeting_service;
pub mod mission;
pub mod mission_service;
pub mod ports;

pub use self::access_policy::{AccessPolicy, Member, RoleListError, parse_role_list};
pub use self::deadline::{
    DEADLINE_INPUT_FORMAT, DeadlineError, ensure_future, format_deadline, parse_deadline,
    parse_meeting_start,
};
pub use self::deadline_reminders::{
    DeadlineReminderEngine, DeadlineReminderPorts, PassReport, PlannedDigest, PlannedReminder,
    ReminderSchedule, ReminderScheduler, decide_reminder, plan_digests, plan_reminders,
    reminder_text,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{EMPTY_LISTING, render_listing, render_mission_row};
pub use self::meeting::{MEETING_DURATION, Meeting, MeetingDraft};
pub use self::meeting_service::MeetingService;
pub use self::mission::{
    DEFAULT_STATUS, GroupId, MemberId, Mission, MissionDescription, MissionDraft, MissionFilter,
    MissionId, MissionStatus, MissionValidationError, NewMission, ReminderThreshold, RoleId,
};
pub use self::mission_service::MissionService;
