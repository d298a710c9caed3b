//! Mission data model.
//!
//! A mission is one unit of work assigned to a member of a group. It carries
//! an optional deadline, a free-text status owned by the assignee, a terminal
//! `done` flag and two monotonic reminder flags recording which deadline
//! thresholds have already been notified.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Generates an integer identifier newtype with the shared trait set.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw integer value as stored.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id! {
    /// Store-assigned mission identifier; monotonically increasing, never reused.
    MissionId
}
define_id! {
    /// Partition key of the collaborative space a mission belongs to.
    GroupId
}
define_id! {
    /// Identifier of a group member (author, assignee or caller).
    MemberId
}
define_id! {
    /// Identifier of a role held by members.
    RoleId
}

/// Default status label for newly created missions.
pub const DEFAULT_STATUS: &str = "in progress";

/// Validation errors for mission fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissionValidationError {
    #[error("mission description must not be empty")]
    EmptyDescription,
    #[error("mission status must not be empty")]
    EmptyStatus,
    #[error("unknown mission filter '{0}'; expected open, done or all")]
    UnknownFilter(String),
}

/// Non-blank mission description, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MissionDescription(String);

impl MissionDescription {
    /// Validate and construct a description.
    pub fn new(raw: impl Into<String>) -> Result<Self, MissionValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MissionValidationError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MissionDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MissionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MissionDescription> for String {
    fn from(value: MissionDescription) -> Self {
        value.0
    }
}

impl TryFrom<String> for MissionDescription {
    type Error = MissionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text progress label, mutable only by the assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MissionStatus(String);

impl MissionStatus {
    /// Validate and construct a status label.
    pub fn new(raw: impl Into<String>) -> Result<Self, MissionValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MissionValidationError::EmptyStatus);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl Default for MissionStatus {
    fn default() -> Self {
        Self(DEFAULT_STATUS.to_owned())
    }
}

impl AsRef<str> for MissionStatus {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MissionStatus> for String {
    fn from(value: MissionStatus) -> Self {
        value.0
    }
}

impl TryFrom<String> for MissionStatus {
    type Error = MissionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Which missions a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionFilter {
    /// Missions not yet marked done.
    #[default]
    Open,
    /// Completed missions.
    Done,
    /// Every mission in the group.
    All,
}

impl MissionFilter {
    /// Whether a mission with the given `done` flag passes this filter.
    pub fn admits(self, done: bool) -> bool {
        match self {
            Self::Open => !done,
            Self::Done => done,
            Self::All => true,
        }
    }
}

impl FromStr for MissionFilter {
    type Err = MissionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            "all" => Ok(Self::All),
            other => Err(MissionValidationError::UnknownFilter(other.to_owned())),
        }
    }
}

/// Remaining-time boundary at which exactly one notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderThreshold {
    /// Deadline is between one and twenty-four hours away.
    TwentyFourHours,
    /// Deadline is at most one hour away.
    OneHour,
}

impl ReminderThreshold {
    /// Upper bound of the remaining time covered by this threshold.
    pub fn window(self) -> TimeDelta {
        match self {
            Self::TwentyFourHours => TimeDelta::hours(24),
            Self::OneHour => TimeDelta::hours(1),
        }
    }
}

impl fmt::Display for ReminderThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwentyFourHours => f.write_str("24h"),
            Self::OneHour => f.write_str("1h"),
        }
    }
}

/// Field bundle used to rebuild a [`Mission`] from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionDraft {
    /// Store-assigned id.
    pub id: MissionId,
    /// Owning group.
    pub group: GroupId,
    /// Member who assigned the mission.
    pub author: MemberId,
    /// Member responsible for the mission.
    pub assignee: MemberId,
    /// Raw description; must be non-blank.
    pub description: String,
    /// Optional UTC deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Raw status label; must be non-blank.
    pub status: String,
    /// Whether the mission was completed.
    pub done: bool,
    /// Whether the 24-hour notice was sent.
    pub reminded_24: bool,
    /// Whether the 1-hour notice was sent.
    pub reminded_1: bool,
}

/// A persisted mission.
///
/// ## Invariants
/// - `description` and `status` are non-blank.
/// - `reminded_24` and `reminded_1` only ever move from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    id: MissionId,
    group: GroupId,
    author: MemberId,
    assignee: MemberId,
    description: MissionDescription,
    deadline: Option<DateTime<Utc>>,
    status: MissionStatus,
    done: bool,
    reminded_24: bool,
    reminded_1: bool,
}

impl Mission {
    /// Validate a draft loaded from storage.
    pub fn new(draft: MissionDraft) -> Result<Self, MissionValidationError> {
        let MissionDraft {
            id,
            group,
            author,
            assignee,
            description,
            deadline,
            status,
            done,
            reminded_24,
            reminded_1,
        } = draft;

        Ok(Self {
            id,
            group,
            author,
            assignee,
            description: MissionDescription::new(description)?,
            deadline,
            status: MissionStatus::new(status)?,
            done,
            reminded_24,
            reminded_1,
        })
    }

    pub fn id(&self) -> MissionId {
        self.id
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn author(&self) -> MemberId {
        self.author
    }

    pub fn assignee(&self) -> MemberId {
        self.assignee
    }

    pub fn description(&self) -> &MissionDescription {
        &self.description
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn status(&self) -> &MissionStatus {
        &self.status
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn reminded_24(&self) -> bool {
        self.reminded_24
    }

    pub fn reminded_1(&self) -> bool {
        self.reminded_1
    }

    /// Whether the given threshold has already fired.
    pub fn has_fired(&self, threshold: ReminderThreshold) -> bool {
        match threshold {
            ReminderThreshold::TwentyFourHours => self.reminded_24,
            ReminderThreshold::OneHour => self.reminded_1,
        }
    }

    /// Time left until the deadline, negative once it has passed.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.deadline.map(|deadline| deadline - now)
    }
}

/// Validated input for creating a mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMission {
    /// Owning group.
    pub group: GroupId,
    /// Authorized member creating the mission.
    pub author: MemberId,
    /// Member receiving the mission.
    pub assignee: MemberId,
    /// Trimmed, non-blank description.
    pub description: MissionDescription,
    /// Deadline already checked to lie in the future.
    pub deadline: Option<DateTime<Utc>>,
}
