//! Ports for the host's notification transport.
//!
//! The host decides how a message travels (direct message, channel post,
//! webhook). A recipient the host cannot reach is reported as
//! [`DeliveryOutcome::RecipientUnavailable`] rather than as an error so the
//! engine can skip it without treating the transport as broken.

use async_trait::async_trait;

use crate::domain::{GroupId, MemberId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification adapters.
    pub enum NotifierError {
        /// Transport failed before the host acknowledged the message.
        Delivery { message: String } => "notification delivery failed: {message}",
        /// Host refused the message.
        Rejected { message: String } => "notification rejected: {message}",
    }
}

/// Result of a delivery attempt the host did acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Host accepted the message for the recipient.
    Delivered,
    /// Recipient left the group or has no reachable inbox.
    RecipientUnavailable,
}

/// Direct notification to one member.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberNotifier: Send + Sync {
    async fn notify(
        &self,
        recipient: MemberId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError>;
}

/// Broadcast to a group's announcement channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelNotifier: Send + Sync {
    async fn announce(&self, group: GroupId, text: &str)
    -> Result<DeliveryOutcome, NotifierError>;
}

/// Fixture notifier that accepts every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotifier;

#[async_trait]
impl MemberNotifier for FixtureNotifier {
    async fn notify(
        &self,
        _recipient: MemberId,
        _text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        Ok(DeliveryOutcome::Delivered)
    }
}

#[async_trait]
impl ChannelNotifier for FixtureNotifier {
    async fn announce(
        &self,
        _group: GroupId,
        _text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        Ok(DeliveryOutcome::Delivered)
    }
}
