//! Mission board entry-point: settings, store, reminder scheduler and HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mission_board::domain::ReminderScheduler;
use mission_board::inbound::http::health::HealthState;
use mission_board::settings::MissionBoardSettings;
use server::{ServerConfig, build_http_state, build_ports, build_reminder_engine, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        MissionBoardSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let policy = Arc::new(
        settings
            .access_policy()
            .map_err(|err| std::io::Error::other(err.to_string()))?,
    );
    let bind_addr = settings
        .bind_address()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let ports = build_ports(&settings).await?;
    let http_state = build_http_state(&ports, policy);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = ReminderScheduler::new(build_reminder_engine(&ports), settings.reminder_schedule())
        .spawn(shutdown_rx);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, http_state))?;
    let handle = server.handle();
    info!(%bind_addr, "mission board listening");

    let server_task = tokio::spawn(server);
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");

    health_state.mark_unhealthy();
    if shutdown_tx.send(true).is_err() {
        warn!("reminder scheduler already stopped");
    }
    handle.stop(true).await;
    if let Err(err) = scheduler.await {
        warn!(error = %err, "reminder scheduler task failed");
    }
    match server_task.await {
        Ok(result) => result,
        Err(err) => Err(std::io::Error::other(err.to_string())),
    }
}
