//! Deadline notification engine.
//!
//! Two passes share the mission repository:
//!
//! - the reminder pass evaluates every open, dated mission against the clock
//!   and fires at most one notice per threshold per mission, persisting the
//!   matching `reminded_*` flag after a successful delivery;
//! - the digest pass posts a stateless "N missions pending" notice to each
//!   group's channel and may repeat every cycle.
//!
//! Deciding what to send is pure ([`decide_reminder`], [`plan_reminders`],
//! [`plan_digests`]); the engine only performs the side effects the plan asks
//! for. A delivery failure leaves the flag unset so the next pass retries.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    ChannelNotifier, DeliveryOutcome, MemberNotifier, MissionRepository, MissionRepositoryError,
};
use crate::domain::{Error, GroupId, MemberId, Mission, MissionId, ReminderThreshold};

mod runtime;

pub use runtime::{ReminderSchedule, ReminderScheduler};

/// Pick the threshold that should fire for `mission` at `now`, if any.
///
/// Thresholds are evaluated by the current remaining time, so a mission first
/// observed inside the one-hour window skips the 24-hour notice for good.
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, Utc};
/// use mission_board::domain::{
///     GroupId, MemberId, Mission, MissionDraft, MissionId, ReminderThreshold, decide_reminder,
/// };
///
/// let now = Utc::now();
/// let mission = Mission::new(MissionDraft {
///     id: MissionId::new(1),
///     group: GroupId::new(1),
///     author: MemberId::new(1),
///     assignee: MemberId::new(2),
///     description: "Review".to_owned(),
///     deadline: Some(now + TimeDelta::minutes(30)),
///     status: "in progress".to_owned(),
///     done: false,
///     reminded_24: false,
///     reminded_1: false,
/// })?;
/// assert_eq!(decide_reminder(&mission, now), Some(ReminderThreshold::OneHour));
/// # Ok::<(), mission_board::domain::MissionValidationError>(())
/// ```
pub fn decide_reminder(mission: &Mission, now: DateTime<Utc>) -> Option<ReminderThreshold> {
    if mission.is_done() || mission.reminded_1() {
        return None;
    }
    let remaining = mission.remaining(now)?;
    if remaining <= TimeDelta::zero() {
        return None;
    }

    if remaining <= ReminderThreshold::OneHour.window() {
        Some(ReminderThreshold::OneHour)
    } else if remaining <= ReminderThreshold::TwentyFourHours.window() && !mission.reminded_24() {
        Some(ReminderThreshold::TwentyFourHours)
    } else {
        None
    }
}

/// Direct-message text for a fired threshold.
pub fn reminder_text(mission: &Mission, threshold: ReminderThreshold) -> String {
    match threshold {
        ReminderThreshold::OneHour => format!(
            "⏰ Reminder: the mission \"{}\" is due in less than one hour!",
            mission.description()
        ),
        ReminderThreshold::TwentyFourHours => format!(
            "⏰ Reminder: the mission \"{}\" is due in 24 hours.",
            mission.description()
        ),
    }
}

/// One notice the reminder pass intends to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReminder {
    /// Mission the notice is about.
    pub mission_id: MissionId,
    /// The mission's assignee.
    pub recipient: MemberId,
    /// Window whose flag is set once the notice lands.
    pub threshold: ReminderThreshold,
    /// Rendered notice.
    pub text: String,
}

/// Decide every reminder due at `now`, in mission order.
pub fn plan_reminders(missions: &[Mission], now: DateTime<Utc>) -> Vec<PlannedReminder> {
    missions
        .iter()
        .filter_map(|mission| {
            decide_reminder(mission, now).map(|threshold| PlannedReminder {
                mission_id: mission.id(),
                recipient: mission.assignee(),
                threshold,
                text: reminder_text(mission, threshold),
            })
        })
        .collect()
}

/// One channel notice the digest pass intends to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDigest {
    /// Group whose channel receives the digest.
    pub group: GroupId,
    /// Open missions listed in the digest.
    pub open_missions: usize,
    /// Rendered digest.
    pub text: String,
}

/// Group open missions by group and render one digest per group.
pub fn plan_digests(missions: &[Mission]) -> Vec<PlannedDigest> {
    let mut by_group: BTreeMap<GroupId, Vec<&Mission>> = BTreeMap::new();
    for mission in missions.iter().filter(|mission| !mission.is_done()) {
        by_group.entry(mission.group()).or_default().push(mission);
    }

    by_group
        .into_iter()
        .map(|(group, mut open)| {
            open.sort_by_key(|mission| mission.id());
            let mut lines = vec![format!("🔔 Reminder: {} mission(s) pending.", open.len())];
            lines.extend(
                open.iter()
                    .map(|mission| format!("• <@{}> → {}", mission.assignee(), mission.description())),
            );
            PlannedDigest {
                group,
                open_missions: open.len(),
                text: lines.join("\n"),
            }
        })
        .collect()
}

/// Counters for one evaluation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Missions or groups examined.
    pub evaluated: usize,
    /// Notices delivered.
    pub sent: usize,
    /// Unreachable recipients and missions completed since the scan.
    pub skipped: usize,
    /// Open-check, delivery or flag-write failures; retried next pass.
    pub failed: usize,
}

/// Port bundle required by the engine.
#[derive(Clone)]
pub struct DeadlineReminderPorts {
    /// Store scanned for open missions and written for reminder flags.
    pub missions: Arc<dyn MissionRepository>,
    /// Direct messages to assignees.
    pub members: Arc<dyn MemberNotifier>,
    /// Group announcement channels.
    pub channels: Arc<dyn ChannelNotifier>,
}

/// Executes reminder and digest passes against the ports.
#[derive(Clone)]
pub struct DeadlineReminderEngine {
    ports: DeadlineReminderPorts,
    clock: Arc<dyn Clock>,
}

fn map_repository_error(error: MissionRepositoryError) -> Error {
    Error::unavailable(format!("mission scan failed: {error}"))
}

impl DeadlineReminderEngine {
    /// Build an engine reading "now" from `clock`.
    pub fn new(ports: DeadlineReminderPorts, clock: Arc<dyn Clock>) -> Self {
        Self { ports, clock }
    }

    /// Evaluate every open, dated mission once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::Unavailable`] only when the
    /// snapshot cannot be read. Per-mission failures are counted and logged.
    pub async fn run_reminder_pass(&self) -> Result<PassReport, Error> {
        let missions = self
            .ports
            .missions
            .list_open_dated()
            .await
            .map_err(map_repository_error)?;
        let now = self.clock.utc();
        let plan = plan_reminders(&missions, now);

        let mut report = PassReport {
            evaluated: missions.len(),
            ..PassReport::default()
        };
        for reminder in plan {
            self.deliver_reminder(&reminder, &mut report).await;
        }
        Ok(report)
    }

    async fn deliver_reminder(&self, reminder: &PlannedReminder, report: &mut PassReport) {
        match self.ports.missions.is_open(reminder.mission_id).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(
                    mission_id = %reminder.mission_id,
                    "mission completed since the scan; skipping reminder"
                );
                report.skipped += 1;
                return;
            }
            Err(error) => {
                warn!(
                    mission_id = %reminder.mission_id,
                    error = %error,
                    "reminder open check failed; retrying next pass"
                );
                report.failed += 1;
                return;
            }
        }

        let outcome = match self
            .ports
            .members
            .notify(reminder.recipient, &reminder.text)
            .await
        {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    mission_id = %reminder.mission_id,
                    threshold = %reminder.threshold,
                    error = %error,
                    "reminder delivery failed; retrying next pass"
                );
                report.failed += 1;
                return;
            }
        };

        if outcome == DeliveryOutcome::RecipientUnavailable {
            info!(
                mission_id = %reminder.mission_id,
                recipient = %reminder.recipient,
                "reminder recipient unavailable; skipping"
            );
            report.skipped += 1;
            return;
        }

        match self
            .ports
            .missions
            .mark_reminded(reminder.mission_id, reminder.threshold)
            .await
        {
            Ok(true) => {
                debug!(
                    mission_id = %reminder.mission_id,
                    threshold = %reminder.threshold,
                    "reminder sent"
                );
                report.sent += 1;
            }
            Ok(false) => {
                debug!(
                    mission_id = %reminder.mission_id,
                    threshold = %reminder.threshold,
                    "reminder flag already set or mission closed"
                );
                report.sent += 1;
            }
            Err(error) => {
                warn!(
                    mission_id = %reminder.mission_id,
                    threshold = %reminder.threshold,
                    error = %error,
                    "reminder flag write failed; retrying next pass"
                );
                report.failed += 1;
            }
        }
    }

    /// Post one pending-missions digest to every group with open work.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::Unavailable`] when the open
    /// missions cannot be read.
    pub async fn run_digest_pass(&self) -> Result<PassReport, Error> {
        let missions = self
            .ports
            .missions
            .list_open()
            .await
            .map_err(map_repository_error)?;
        let plan = plan_digests(&missions);

        let mut report = PassReport {
            evaluated: plan.len(),
            ..PassReport::default()
        };
        for digest in plan {
            match self.ports.channels.announce(digest.group, &digest.text).await {
                Ok(DeliveryOutcome::Delivered) => report.sent += 1,
                Ok(DeliveryOutcome::RecipientUnavailable) => {
                    info!(group = %digest.group, "group has no announcement channel; skipping digest");
                    report.skipped += 1;
                }
                Err(error) => {
                    warn!(group = %digest.group, error = %error, "digest delivery failed");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}
