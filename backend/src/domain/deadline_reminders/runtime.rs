//! Background scheduler driving the engine's two cadences.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use super::{DeadlineReminderEngine, PassReport};

/// Cadences for the reminder and digest passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub reminder_interval: Duration,
    pub digest_interval: Duration,
}

impl ReminderSchedule {
    /// Build a schedule, clamping zero periods to one second.
    pub fn new(reminder_interval: Duration, digest_interval: Duration) -> Self {
        let floor = Duration::from_secs(1);
        Self {
            reminder_interval: reminder_interval.max(floor),
            digest_interval: digest_interval.max(floor),
        }
    }
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            reminder_interval: Duration::from_secs(60),
            digest_interval: Duration::from_secs(72 * 60 * 60),
        }
    }
}

/// Runs both passes on one task so they never overlap.
///
/// The first tick of each interval fires immediately. Shutdown is observed
/// between passes; a pass in flight always finishes.
pub struct ReminderScheduler {
    engine: DeadlineReminderEngine,
    schedule: ReminderSchedule,
}

impl ReminderScheduler {
    /// Pair an engine with the cadences it runs at.
    pub fn new(engine: DeadlineReminderEngine, schedule: ReminderSchedule) -> Self {
        Self { engine, schedule }
    }

    /// Spawn the loop on the current runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run until `shutdown` turns `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut reminders = time::interval(self.schedule.reminder_interval);
        reminders.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut digests = time::interval(self.schedule.digest_interval);
        digests.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            reminder_interval_secs = self.schedule.reminder_interval.as_secs(),
            digest_interval_secs = self.schedule.digest_interval.as_secs(),
            "reminder scheduler started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = reminders.tick() => {
                    log_pass("reminder", self.engine.run_reminder_pass().await);
                }
                _ = digests.tick() => {
                    log_pass("digest", self.engine.run_digest_pass().await);
                }
            }
        }

        info!("reminder scheduler stopped");
    }
}

fn log_pass(pass: &'static str, result: Result<PassReport, crate::domain::Error>) {
    match result {
        Ok(report) => info!(
            pass,
            evaluated = report.evaluated,
            sent = report.sent,
            skipped = report.skipped,
            failed = report.failed,
            "pass complete"
        ),
        Err(err) => error!(pass, error = %err, "pass aborted"),
    }
}
