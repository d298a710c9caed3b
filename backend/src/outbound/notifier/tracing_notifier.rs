//! Log-only notifier.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ChannelNotifier, DeliveryOutcome, MemberNotifier, NotifierError};
use crate::domain::{GroupId, MemberId};

/// Writes every notification to the log and reports it delivered.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl MemberNotifier for TracingNotifier {
    async fn notify(
        &self,
        recipient: MemberId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        info!(recipient = %recipient, text, "member notification");
        Ok(DeliveryOutcome::Delivered)
    }
}

#[async_trait]
impl ChannelNotifier for TracingNotifier {
    async fn announce(
        &self,
        group: GroupId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        info!(group = %group, text, "channel notification");
        Ok(DeliveryOutcome::Delivered)
    }
}
