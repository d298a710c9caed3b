//! Shared test doubles for unit tests.
//!
//! Only compiled for `cargo test`; integration tests in `tests/` drive the
//! public API with the real clock instead.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{DEFAULT_STATUS, GroupId, MemberId, Mission, MissionDraft, MissionId};

/// Clock whose reading only changes when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance(TimeDelta::minutes(minutes));
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant most tests start from.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("fixture timestamp"))
}

/// Open mission in group 1 with the given id, assignee and deadline.
pub fn open_mission(id: i64, assignee: i64, deadline: Option<DateTime<Utc>>) -> Mission {
    mission_from(MissionDraft {
        id: MissionId::new(id),
        group: GroupId::new(1),
        author: MemberId::new(99),
        assignee: MemberId::new(assignee),
        description: format!("mission {id}"),
        deadline,
        status: DEFAULT_STATUS.to_owned(),
        done: false,
        reminded_24: false,
        reminded_1: false,
    })
}

/// Validate a draft, panicking on invalid fixture data.
pub fn mission_from(draft: MissionDraft) -> Mission {
    match Mission::new(draft) {
        Ok(mission) => mission,
        Err(err) => panic!("fixture mission must be valid: {err}"),
    }
}
