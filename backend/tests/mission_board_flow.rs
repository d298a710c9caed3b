//! End-to-end flow over the public API with the in-memory adapters.
//!
//! Missions are created and completed through the HTTP scope, then the
//! reminder engine scans the same store with the real clock.

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use mission_board::domain::ports::{
    ChannelNotifier, DeliveryOutcome, MemberNotifier, MissionRepository, NotifierError,
};
use mission_board::domain::{
    AccessPolicy, DeadlineReminderEngine, DeadlineReminderPorts, GroupId, MeetingService, MemberId,
    MissionFilter, MissionService, RoleId,
};
use mission_board::inbound::http::api_scope;
use mission_board::inbound::http::state::HttpState;
use mission_board::outbound::calendar::InMemoryMeetingCalendar;
use mission_board::outbound::persistence::InMemoryMissionRepository;

const ASSIGNER_ROLE: &str = "10";

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("notifier lock").clone()
    }
}

#[async_trait]
impl MemberNotifier for RecordingNotifier {
    async fn notify(
        &self,
        recipient: MemberId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        self.sent
            .lock()
            .expect("notifier lock")
            .push((format!("member:{recipient}"), text.to_owned()));
        Ok(DeliveryOutcome::Delivered)
    }
}

#[async_trait]
impl ChannelNotifier for RecordingNotifier {
    async fn announce(
        &self,
        group: GroupId,
        text: &str,
    ) -> Result<DeliveryOutcome, NotifierError> {
        self.sent
            .lock()
            .expect("notifier lock")
            .push((format!("group:{group}"), text.to_owned()));
        Ok(DeliveryOutcome::Delivered)
    }
}

struct Harness {
    store: Arc<InMemoryMissionRepository>,
    notifier: Arc<RecordingNotifier>,
    state: web::Data<HttpState>,
    engine: DeadlineReminderEngine,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryMissionRepository::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let policy = Arc::new(AccessPolicy::new([RoleId::new(10)], Some(RoleId::new(99))));

    let missions = Arc::new(MissionService::new(store.clone(), policy.clone(), clock.clone()));
    let meetings = Arc::new(MeetingService::new(
        Arc::new(InMemoryMeetingCalendar::new()),
        policy,
    ));
    let state = web::Data::new(HttpState::new(
        missions.clone(),
        missions,
        meetings.clone(),
        meetings,
    ));
    let engine = DeadlineReminderEngine::new(
        DeadlineReminderPorts {
            missions: store.clone(),
            members: notifier.clone(),
            channels: notifier.clone(),
        },
        clock,
    );

    Harness {
        store,
        notifier,
        state,
        engine,
    }
}

fn in_thirty_minutes() -> String {
    (Utc::now() + TimeDelta::minutes(30)).to_rfc3339()
}

#[actix_web::test]
async fn assign_remind_and_complete() {
    let harness = harness();
    let app = actix_test::init_service(
        App::new()
            .app_data(harness.state.clone())
            .service(api_scope()),
    )
    .await;

    let create = actix_test::TestRequest::post()
        .uri("/api/v1/groups/1/missions")
        .insert_header(("X-Caller-Id", "5"))
        .insert_header(("X-Caller-Roles", ASSIGNER_ROLE))
        .set_json(json!({
            "assigneeId": 42,
            "assigneeRoles": [],
            "description": "Prepare the release notes",
            "deadline": in_thirty_minutes(),
        }))
        .to_request();
    let response = actix_test::call_service(&app, create).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(response).await;
    let mission_id = created["missionId"].as_i64().expect("mission id");

    let report = harness.engine.run_reminder_pass().await.expect("pass");
    assert_eq!(report.sent, 1);
    let again = harness.engine.run_reminder_pass().await.expect("pass");
    assert_eq!(again.sent, 0, "the one-hour notice fires once");

    let sent = harness.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "member:42");
    assert!(sent[0].1.contains("less than one hour"));

    let complete = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/groups/1/missions/{mission_id}/complete"))
        .insert_header(("X-Caller-Id", "5"))
        .insert_header(("X-Caller-Roles", ASSIGNER_ROLE))
        .to_request();
    let response = actix_test::call_service(&app, complete).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let open = harness
        .store
        .list_by_group(GroupId::new(1), MissionFilter::Open)
        .await
        .expect("list");
    assert!(open.is_empty());

    let listing = actix_test::TestRequest::get()
        .uri("/api/v1/groups/1/missions?filter=done")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, listing).await;
    assert_eq!(body["total"], 1);
    assert!(
        body["text"]
            .as_str()
            .is_some_and(|text| text.contains("Prepare the release notes") && text.contains("✅"))
    );
}

#[actix_web::test]
async fn unauthorized_and_foreign_callers_are_refused() {
    let harness = harness();
    let app = actix_test::init_service(
        App::new()
            .app_data(harness.state.clone())
            .service(api_scope()),
    )
    .await;

    let unauthorized = actix_test::TestRequest::post()
        .uri("/api/v1/groups/1/missions")
        .insert_header(("X-Caller-Id", "6"))
        .set_json(json!({ "assigneeId": 42, "assigneeRoles": [], "description": "Sneaky" }))
        .to_request();
    let response = actix_test::call_service(&app, unauthorized).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let blocked_assignee = actix_test::TestRequest::post()
        .uri("/api/v1/groups/1/missions")
        .insert_header(("X-Caller-Id", "5"))
        .insert_header(("X-Caller-Roles", ASSIGNER_ROLE))
        .set_json(json!({
            "assigneeId": 43,
            "assigneeRoles": [99],
            "description": "Not for you",
        }))
        .to_request();
    let response = actix_test::call_service(&app, blocked_assignee).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let create = actix_test::TestRequest::post()
        .uri("/api/v1/groups/1/missions")
        .insert_header(("X-Caller-Id", "5"))
        .insert_header(("X-Caller-Roles", ASSIGNER_ROLE))
        .set_json(json!({ "assigneeId": 42, "assigneeRoles": [], "description": "Owned work" }))
        .to_request();
    let created: Value = actix_test::call_and_read_body_json(&app, create).await;
    let mission_id = created["missionId"].as_i64().expect("mission id");

    let foreign_status = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/groups/1/missions/{mission_id}/status"))
        .insert_header(("X-Caller-Id", "7"))
        .set_json(json!({ "status": "hijacked" }))
        .to_request();
    let response = actix_test::call_service(&app, foreign_status).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let other_group = actix_test::TestRequest::post()
        .uri(&format!("/api/v1/groups/2/missions/{mission_id}/complete"))
        .insert_header(("X-Caller-Id", "5"))
        .insert_header(("X-Caller-Roles", ASSIGNER_ROLE))
        .to_request();
    let response = actix_test::call_service(&app, other_group).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let own_status = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/groups/1/missions/{mission_id}/status"))
        .insert_header(("X-Caller-Id", "42"))
        .set_json(json!({ "status": "drafting" }))
        .to_request();
    let response = actix_test::call_service(&app, own_status).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn digest_lists_open_missions_per_group() {
    let harness = harness();
    let app = actix_test::init_service(
        App::new()
            .app_data(harness.state.clone())
            .service(api_scope()),
    )
    .await;

    for (group, description) in [(1, "First"), (1, "Second"), (2, "Elsewhere")] {
        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/groups/{group}/missions"))
            .insert_header(("X-Caller-Id", "5"))
            .insert_header(("X-Caller-Roles", ASSIGNER_ROLE))
            .set_json(json!({
                "assigneeId": 42,
                "assigneeRoles": [],
                "description": description,
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let report = harness.engine.run_digest_pass().await.expect("digest");
    assert_eq!(report.sent, 2);

    let sent = harness.notifier.sent();
    assert_eq!(sent[0].0, "group:1");
    assert!(sent[0].1.starts_with("🔔 Reminder: 2 mission(s) pending."));
    assert_eq!(sent[1].0, "group:2");
}
