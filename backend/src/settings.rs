//! Process settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `MISSION_BOARD_*` environment variables over
//! an optional config file. Every field is optional; accessors supply the
//! defaults and validate on read so startup fails with a precise message.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{AccessPolicy, ReminderSchedule, RoleId, RoleListError, parse_role_list};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;
const DEFAULT_DIGEST_INTERVAL_HOURS: u64 = 72;
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `assigner_roles` holds a non-integer entry.
    #[error("invalid assigner roles: {0}")]
    Roles(#[from] RoleListError),
    /// `bind_address` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddress {
        value: String,
        source: std::net::AddrParseError,
    },
    /// `notify_webhook_url` is not an absolute URL.
    #[error("invalid notification webhook URL '{value}': {source}")]
    WebhookUrl {
        value: String,
        source: url::ParseError,
    },
}

/// Runtime configuration for the mission board service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MISSION_BOARD")]
pub struct MissionBoardSettings {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// Comma-separated role ids allowed to assign and complete missions.
    pub assigner_roles: Option<String>,
    /// Role whose holders may never receive missions.
    pub blocked_receiver_role: Option<i64>,
    /// Seconds between reminder passes.
    pub reminder_interval_secs: Option<u64>,
    /// Hours between channel digests.
    pub digest_interval_hours: Option<u64>,
    /// Relay endpoint for notifications; log-only when absent.
    pub notify_webhook_url: Option<String>,
    /// Per-request timeout for the relay, in seconds.
    pub notify_timeout_secs: Option<u64>,
}

impl MissionBoardSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] for an unparsable address.
    pub fn bind_address(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse().map_err(|source| SettingsError::BindAddress {
            value: raw.to_owned(),
            source,
        })
    }

    /// Authorization guard built from the configured roles.
    ///
    /// An absent allow-list yields a policy that authorizes nobody.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Roles`] when the role list has a non-integer entry.
    pub fn access_policy(&self) -> Result<AccessPolicy, SettingsError> {
        let allowed = match self.assigner_roles.as_deref() {
            Some(raw) => parse_role_list(raw)?,
            None => Default::default(),
        };
        Ok(AccessPolicy::new(
            allowed,
            self.blocked_receiver_role.map(RoleId::new),
        ))
    }

    /// Cadences for the reminder scheduler.
    pub fn reminder_schedule(&self) -> ReminderSchedule {
        let reminder_secs = self
            .reminder_interval_secs
            .unwrap_or(DEFAULT_REMINDER_INTERVAL_SECS);
        let digest_hours = self
            .digest_interval_hours
            .unwrap_or(DEFAULT_DIGEST_INTERVAL_HOURS);
        ReminderSchedule::new(
            Duration::from_secs(reminder_secs),
            Duration::from_secs(digest_hours.saturating_mul(60 * 60)),
        )
    }

    /// Relay endpoint, when configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::WebhookUrl`] for a malformed URL.
    pub fn notify_webhook_url(&self) -> Result<Option<Url>, SettingsError> {
        self.notify_webhook_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|source| SettingsError::WebhookUrl {
                    value: raw.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// Relay request timeout, defaulting to ten seconds and never below one.
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(
            self.notify_timeout_secs
                .unwrap_or(DEFAULT_NOTIFY_TIMEOUT_SECS)
                .max(1),
        )
    }
}
