//! Notification adapters for the member and channel notifier ports.
//!
//! The webhook adapter relays messages to the chat host over HTTP. The
//! tracing adapter only logs, for deployments without a relay.

mod tracing_notifier;
mod webhook_notifier;

pub use tracing_notifier::TracingNotifier;
pub use webhook_notifier::WebhookNotifier;
