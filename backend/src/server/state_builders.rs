//! Adapter selection from settings.
//!
//! A configured database URL selects the Diesel store, after migrations run;
//! otherwise the in-memory store is used. A configured webhook selects the
//! HTTP relay; otherwise notifications are only logged.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use mission_board::domain::ports::{
    ChannelNotifier, MeetingCalendar, MemberNotifier, MissionRepository,
};
use mission_board::domain::{
    AccessPolicy, DeadlineReminderEngine, DeadlineReminderPorts, MeetingService, MissionService,
};
use mission_board::inbound::http::state::HttpState;
use mission_board::outbound::calendar::InMemoryMeetingCalendar;
use mission_board::outbound::notifier::{TracingNotifier, WebhookNotifier};
use mission_board::outbound::persistence::{
    DbPool, DieselMissionRepository, InMemoryMissionRepository, PoolConfig,
    run_pending_migrations,
};
use mission_board::settings::MissionBoardSettings;

/// Ports shared by the HTTP services and the reminder engine.
pub struct AppPorts {
    pub missions: Arc<dyn MissionRepository>,
    pub members: Arc<dyn MemberNotifier>,
    pub channels: Arc<dyn ChannelNotifier>,
    pub calendar: Arc<dyn MeetingCalendar>,
    pub clock: Arc<dyn Clock>,
}

/// Choose the mission store.
///
/// # Errors
///
/// Returns [`std::io::Error`] when migrations or pool construction fail.
pub async fn build_mission_repository(
    settings: &MissionBoardSettings,
) -> std::io::Result<Arc<dyn MissionRepository>> {
    let Some(url) = settings.database_url.as_deref() else {
        warn!("no database URL configured; missions are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryMissionRepository::new()));
    };

    run_pending_migrations(url)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!("using PostgreSQL mission store");
    Ok(Arc::new(DieselMissionRepository::new(pool)))
}

/// Choose the notification transport.
///
/// # Errors
///
/// Returns [`std::io::Error`] for a malformed URL or an unbuildable client.
pub fn build_notifiers(
    settings: &MissionBoardSettings,
) -> std::io::Result<(Arc<dyn MemberNotifier>, Arc<dyn ChannelNotifier>)> {
    let url = settings
        .notify_webhook_url()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    if let Some(url) = url {
        info!(relay = %url, "relaying notifications over HTTP");
        let notifier = Arc::new(
            WebhookNotifier::new(url, settings.notify_timeout())
                .map_err(|err| std::io::Error::other(err.to_string()))?,
        );
        let members: Arc<dyn MemberNotifier> = notifier.clone();
        let channels: Arc<dyn ChannelNotifier> = notifier;
        return Ok((members, channels));
    }

    warn!("no notification relay configured; notifications are only logged");
    let members: Arc<dyn MemberNotifier> = Arc::new(TracingNotifier);
    let channels: Arc<dyn ChannelNotifier> = Arc::new(TracingNotifier);
    Ok((members, channels))
}

/// Build every port from settings.
///
/// # Errors
///
/// Propagates store and notifier construction failures.
pub async fn build_ports(settings: &MissionBoardSettings) -> std::io::Result<AppPorts> {
    let missions = build_mission_repository(settings).await?;
    let (members, channels) = build_notifiers(settings)?;
    Ok(AppPorts {
        missions,
        members,
        channels,
        calendar: Arc::new(InMemoryMeetingCalendar::new()),
        clock: Arc::new(DefaultClock),
    })
}

/// Wire the driving ports for the HTTP handlers.
pub fn build_http_state(ports: &AppPorts, policy: Arc<AccessPolicy>) -> HttpState {
    let missions = Arc::new(MissionService::new(
        ports.missions.clone(),
        policy.clone(),
        ports.clock.clone(),
    ));
    let meetings = Arc::new(MeetingService::new(ports.calendar.clone(), policy));
    HttpState::new(missions.clone(), missions, meetings.clone(), meetings)
}

/// Wire the reminder engine over the same store and transports.
pub fn build_reminder_engine(ports: &AppPorts) -> DeadlineReminderEngine {
    DeadlineReminderEngine::new(
        DeadlineReminderPorts {
            missions: ports.missions.clone(),
            members: ports.members.clone(),
            channels: ports.channels.clone(),
        },
        ports.clock.clone(),
    )
}
