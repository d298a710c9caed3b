//! Reqwest-backed notification relay.
//!
//! Messages are POSTed as JSON to `{base}/members/{id}` or
//! `{base}/channels/{group}`. The relay answers 404 or 410 for recipients it
//! cannot reach; those become [`DeliveryOutcome::RecipientUnavailable`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::ports::{ChannelNotifier, DeliveryOutcome, MemberNotifier, NotifierError};
use crate::domain::{GroupId, MemberId};

const USER_AGENT: &str = "mission-board-notifier/0.1";

#[derive(Debug, Serialize)]
struct NotificationBody<'a> {
    text: &'a str,
}

/// Notifier adapter that relays messages to one HTTP endpoint.
pub struct WebhookNotifier {
    client: Client,
    base: Url,
}

impl WebhookNotifier {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base })
    }

    fn target(&self, kind: &str, id: &str) -> Result<Url, NotifierError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| NotifierError::rejected("relay URL cannot carry a path"))?
            .pop_if_empty()
            .extend([kind, id]);
        Ok(url)
    }

    async fn post(&self, url: Url, text: &str) -> Result<DeliveryOutcome, NotifierError> {
        let response = self
            .client
            .post(url)
            .json(&NotificationBody { text })
            .send()
            .await
            .map_err(map_transport_error)?;
        map_status(response.status())
    }
}

#[async_trait]
impl MemberNotifier for WebhookNotifier {
    async fn notify(
        &self,
        recipient: MemberId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        let url = self.target("members", &recipient.to_string())?;
        self.post(url, text).await
    }
}

#[async_trait]
impl ChannelNotifier for WebhookNotifier {
    async fn announce(
        &self,
        group: GroupId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        let url = self.target("channels", &group.to_string())?;
        self.post(url, text).await
    }
}

fn map_transport_error(error: reqwest::Error) -> NotifierError {
    NotifierError::delivery(error.to_string())
}

fn map_status(status: StatusCode) -> Result<DeliveryOutcome, NotifierError> {
    match status {
        _ if status.is_success() => Ok(DeliveryOutcome::Delivered),
        StatusCode::NOT_FOUND | StatusCode::GONE => Ok(DeliveryOutcome::RecipientUnavailable),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => Err(
            NotifierError::delivery(format!("status {}", status.as_u16())),
        ),
        _ if status.is_client_error() => Err(NotifierError::rejected(format!(
            "status {}",
            status.as_u16()
        ))),
        _ => Err(NotifierError::delivery(format!(
            "status {}",
            status.as_u16()
        ))),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network relay helpers.

    use rstest::rstest;

    use super::*;

    fn notifier(base: &str) -> WebhookNotifier {
        let base = Url::parse(base).expect("valid base URL");
        WebhookNotifier::new(base, Duration::from_secs(1)).expect("client builds")
    }

    #[rstest]
    #[case("https://relay.test/hooks", "https://relay.test/hooks/members/42")]
    #[case("https://relay.test/hooks/", "https://relay.test/hooks/members/42")]
    #[case("https://relay.test", "https://relay.test/members/42")]
    fn member_targets_append_segments(#[case] base: &str, #[case] expected: &str) {
        let url = notifier(base)
            .target("members", "42")
            .expect("target builds");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case(StatusCode::OK, Ok(DeliveryOutcome::Delivered))]
    #[case(StatusCode::ACCEPTED, Ok(DeliveryOutcome::Delivered))]
    #[case(StatusCode::NOT_FOUND, Ok(DeliveryOutcome::RecipientUnavailable))]
    #[case(StatusCode::GONE, Ok(DeliveryOutcome::RecipientUnavailable))]
    #[case(StatusCode::BAD_REQUEST, Err(NotifierError::rejected("status 400")))]
    #[case(StatusCode::TOO_MANY_REQUESTS, Err(NotifierError::delivery("status 429")))]
    #[case(StatusCode::BAD_GATEWAY, Err(NotifierError::delivery("status 502")))]
    fn statuses_map_to_outcomes(
        #[case] status: StatusCode,
        #[case] expected: Result<DeliveryOutcome, NotifierError>,
    ) {
        assert_eq!(map_status(status), expected);
    }

    #[rstest]
    fn body_serialises_text_only() {
        let body = serde_json::to_value(NotificationBody { text: "hi" }).expect("serialise");
        assert_eq!(body, serde_json::json!({ "text": "hi" }));
    }
}
