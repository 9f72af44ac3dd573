use super::common::*;
use crate::workflows::inquiry::delivery::DeliveryStatus;
use crate::workflows::inquiry::domain::PriorityTier;
use crate::workflows::inquiry::notifications::{MessageKind, NotificationPayload};
use crate::workflows::inquiry::{IntakeServiceError, ValidationError};
use std::sync::Arc;

#[test]
fn submit_sends_both_messages_with_configured_templates() {
    let (service, dispatcher) = build_service();

    let receipt = service
        .submit(&high_value_inquiry())
        .expect("submission succeeds");

    assert!(receipt.delivery.is_complete());
    assert_eq!(receipt.evaluation.tier, PriorityTier::High);
    assert!(receipt.confirmation.contains("high priority inquiry for Vega Bakery"));

    let mut sent = dispatcher.sent();
    sent.sort_by_key(|(route, _)| route.template_id.clone());
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0.template_id, "business_notification");
    assert!(matches!(sent[0].1, NotificationPayload::InternalAlert(_)));
    assert_eq!(sent[1].0.template_id, "client_autoresponder");
    assert!(matches!(sent[1].1, NotificationPayload::Acknowledgement(_)));
    assert!(sent.iter().all(|(route, _)| route.service_id == "lead-intake"));
}

#[test]
fn submit_rejects_missing_identity_without_sending() {
    let (service, dispatcher) = build_service();
    let mut input = high_value_inquiry();
    input.contact_email = String::new();

    match service.submit(&input) {
        Err(IntakeServiceError::Validation(ValidationError::MissingField { field })) => {
            assert_eq!(field, "contactEmail");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(dispatcher.sent().is_empty());
}

#[test]
fn partial_delivery_failure_preserves_evaluation() {
    let dispatcher = Arc::new(FailingDispatcher::failing(MessageKind::InternalAlert));
    let service = service_with(dispatcher.clone());

    match service.submit(&low_value_inquiry()) {
        Err(IntakeServiceError::Delivery { evaluation, report }) => {
            assert_eq!(evaluation.score, 20);
            assert_eq!(evaluation.tier, PriorityTier::Low);
            assert!(!report.is_complete());

            let failures: Vec<_> = report.failures().collect();
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].kind, MessageKind::InternalAlert);
            assert!(matches!(
                &failures[0].status,
                DeliveryStatus::Failed { reason } if reason.contains("smtp relay offline")
            ));
        }
        other => panic!("expected delivery failure, got {other:?}"),
    }

    assert_eq!(
        *dispatcher.accepted.lock().expect("dispatcher mutex poisoned"),
        vec![MessageKind::Acknowledgement]
    );
}

#[test]
fn redeliver_reuses_the_original_evaluation() {
    let failing = Arc::new(FailingDispatcher::failing(MessageKind::Acknowledgement));
    let evaluation = match service_with(failing).submit(&high_value_inquiry()) {
        Err(IntakeServiceError::Delivery { evaluation, .. }) => *evaluation,
        other => panic!("expected delivery failure, got {other:?}"),
    };

    let (service, dispatcher) = build_service();
    let receipt = service
        .redeliver(evaluation.clone())
        .expect("redelivery succeeds");

    assert_eq!(receipt.evaluation, evaluation);
    assert_eq!(dispatcher.sent().len(), 2);
}

#[test]
fn redeliver_readdresses_a_forged_owner_alert() {
    let (service, dispatcher) = build_service();
    let mut evaluation = service
        .preview(&high_value_inquiry())
        .expect("preview succeeds");
    evaluation.internal_alert.to_email = "relay@attacker.example".to_string();

    let receipt = service.redeliver(evaluation).expect("redelivery succeeds");

    assert_eq!(receipt.evaluation.internal_alert.to_email, "leads@example.com");
    let alerts: Vec<_> = dispatcher
        .sent()
        .into_iter()
        .filter_map(|(_, payload)| match payload {
            NotificationPayload::InternalAlert(alert) => Some(alert),
            NotificationPayload::Acknowledgement(_) => None,
        })
        .collect();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].to_email, "leads@example.com");
}

#[test]
fn preview_does_not_dispatch() {
    let (service, dispatcher) = build_service();

    let evaluation = service
        .preview(&high_value_inquiry())
        .expect("preview succeeds");

    assert_eq!(evaluation.score, 70);
    assert!(dispatcher.sent().is_empty());
}

#[test]
fn status_view_exposes_tier_and_window() {
    let (service, _) = build_service();

    let receipt = service
        .submit(&low_value_inquiry())
        .expect("submission succeeds");
    let view = receipt.status_view();

    assert_eq!(view.score, 20);
    assert_eq!(view.tier, PriorityTier::Low);
    assert_eq!(view.priority_class, "low");
    assert_eq!(view.response_time, "24 hours");
    assert_eq!(view.message, receipt.confirmation);
}

#[test]
fn fallback_message_points_to_phone_and_email() {
    let message = fallback().failure_message();

    assert!(message.contains("(303) 555-0100"));
    assert!(message.contains("studio@example.com"));
}
