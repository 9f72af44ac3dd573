//! Integration scenarios for inquiry intake through the public service facade and HTTP router.

mod common {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};

    use lead_intake::workflows::inquiry::{
        DeliveryError, DeliveryReceipt, DeliveryRoute, EvaluationConfig, FallbackContact,
        FixedClock, InquiryInput, InquiryIntakeService, MessageRoute, NotificationDispatcher,
        NotificationPayload,
    };

    pub(super) fn clock() -> FixedClock {
        FixedClock(
            Utc.with_ymd_and_hms(2025, 11, 20, 22, 0, 0)
                .single()
                .expect("valid timestamp"),
        )
    }

    pub(super) fn inquiry() -> InquiryInput {
        InquiryInput {
            contact_name: "Priya Natarajan".to_string(),
            contact_email: "priya@summitlegal.example".to_string(),
            contact_phone: None,
            business_name: Some("Summit Legal Group".to_string()),
            business_type: Some("professional-services".to_string()),
            budget_range: Some("5000-10000".to_string()),
            timeline: Some("within-month".to_string()),
            current_website_status: Some("outdated".to_string()),
            requested_services: vec!["Website Redesign".to_string()],
            project_details: None,
        }
    }

    #[derive(Default)]
    pub(super) struct RecordingDispatcher {
        pub(super) sent: Mutex<Vec<(MessageRoute, NotificationPayload)>>,
    }

    impl NotificationDispatcher for RecordingDispatcher {
        fn dispatch(
            &self,
            route: &MessageRoute,
            payload: &NotificationPayload,
        ) -> Result<DeliveryReceipt, DeliveryError> {
            self.sent
                .lock()
                .expect("dispatcher mutex poisoned")
                .push((route.clone(), payload.clone()));
            Ok(DeliveryReceipt {
                message_id: format!("{}-ok", route.template_id),
            })
        }
    }

    pub(super) struct OfflineDispatcher;

    impl NotificationDispatcher for OfflineDispatcher {
        fn dispatch(
            &self,
            _route: &MessageRoute,
            _payload: &NotificationPayload,
        ) -> Result<DeliveryReceipt, DeliveryError> {
            Err(DeliveryError::Transport("provider timeout".to_string()))
        }
    }

    pub(super) fn service<D>(dispatcher: Arc<D>, config: EvaluationConfig) -> InquiryIntakeService<D>
    where
        D: NotificationDispatcher + 'static,
    {
        InquiryIntakeService::with_clock(
            dispatcher,
            config,
            DeliveryRoute {
                service_id: "summit".to_string(),
                acknowledgement_template: "thanks".to_string(),
                internal_alert_template: "new_lead".to_string(),
            },
            FallbackContact {
                phone: "(720) 555-0188".to_string(),
                email: "office@example.com".to_string(),
            },
            Arc::new(clock()),
        )
    }
}

use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use common::*;
use lead_intake::workflows::inquiry::{
    inquiry_router, EvaluationConfig, IntakeServiceError, NotificationPayload, PriorityTier,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[test]
fn submission_produces_alert_and_acknowledgement() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = service(dispatcher.clone(), EvaluationConfig::standard());

    // professional-services(12) + 5000-10000(15) + within-month(12) + outdated(15)
    let receipt = service.submit(&inquiry()).expect("intake succeeds");
    assert_eq!(receipt.evaluation.score, 54);
    assert_eq!(receipt.evaluation.tier, PriorityTier::High);

    let sent = dispatcher.sent.lock().expect("dispatcher mutex poisoned");
    let alert = sent
        .iter()
        .find_map(|(route, payload)| match payload {
            NotificationPayload::InternalAlert(alert) if route.template_id == "new_lead" => {
                Some(alert.clone())
            }
            _ => None,
        })
        .expect("internal alert dispatched");
    assert_eq!(alert.business_type, "Professional Services");
    assert_eq!(alert.budget, "$5,000 - $10,000");
    assert_eq!(alert.timeline, "Within 1 month");
    assert_eq!(alert.current_website, "Outdated website");
    assert_eq!(alert.phone, "Not provided");
    assert_eq!(alert.project_details, "No additional details provided");
    assert_eq!(alert.submission_time, "Thursday, November 20, 2025 at 3:00 PM MT");

    let acknowledgement = sent
        .iter()
        .find_map(|(route, payload)| match payload {
            NotificationPayload::Acknowledgement(message) if route.template_id == "thanks" => {
                Some(message.clone())
            }
            _ => None,
        })
        .expect("acknowledgement dispatched");
    assert_eq!(acknowledgement.to_email, "priya@summitlegal.example");
    assert_eq!(acknowledgement.project_type, "Website Redesign");
    assert_eq!(acknowledgement.response_time, "2 hours");
}

#[test]
fn offline_provider_surfaces_evaluation_for_retry() {
    let service = service(Arc::new(OfflineDispatcher), EvaluationConfig::standard());

    match service.submit(&inquiry()) {
        Err(IntakeServiceError::Delivery { evaluation, report }) => {
            assert_eq!(evaluation.score, 54);
            assert_eq!(report.failures().count(), 2);
        }
        other => panic!("expected delivery failure, got {other:?}"),
    }
}

#[test]
fn tighter_thresholds_change_only_the_tier() {
    let mut config = EvaluationConfig::standard();
    config.thresholds.high = 60;
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = service(dispatcher, config);

    let evaluation = service.preview(&inquiry()).expect("preview succeeds");

    assert_eq!(evaluation.score, 54);
    assert_eq!(evaluation.tier, PriorityTier::Medium);
    assert_eq!(evaluation.response_time_promise, "6 hours");
}

#[tokio::test]
async fn router_round_trip_returns_confirmation() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let router = inquiry_router(Arc::new(service(
        dispatcher.clone(),
        EvaluationConfig::standard(),
    )));

    let response = router
        .oneshot(
            Request::post("/api/v1/inquiries")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&inquiry()).expect("serialize inquiry"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["tier"], json!("HIGH"));
    assert!(payload["message"]
        .as_str()
        .unwrap_or_default()
        .contains("Summit Legal Group"));
    assert_eq!(
        dispatcher
            .sent
            .lock()
            .expect("dispatcher mutex poisoned")
            .len(),
        2
    );
}

#[tokio::test]
async fn router_rejects_blank_email() {
    let router = inquiry_router(Arc::new(service(
        Arc::new(RecordingDispatcher::default()),
        EvaluationConfig::standard(),
    )));
    let mut input = inquiry();
    input.contact_email = " ".to_string();

    let response = router
        .oneshot(
            Request::post("/api/v1/inquiries/evaluate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&input).expect("serialize inquiry"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
