use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::inquiry::delivery::{
    DeliveryError, DeliveryReceipt, DeliveryRoute, FallbackContact, MessageRoute,
    NotificationDispatcher,
};
use crate::workflows::inquiry::notifications::{MessageKind, NotificationPayload};
use crate::workflows::inquiry::{
    inquiry_router, EvaluationConfig, FixedClock, InquiryInput, InquiryIntakeService,
    LeadEvaluator,
};

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn clock() -> FixedClock {
    FixedClock(submitted_at())
}

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig::standard()
}

pub(super) fn evaluator() -> LeadEvaluator {
    LeadEvaluator::new(evaluation_config())
}

pub(super) fn inquiry(
    business_type: Option<&str>,
    budget_range: Option<&str>,
    timeline: Option<&str>,
    website: Option<&str>,
) -> InquiryInput {
    InquiryInput {
        contact_name: "Marisol Vega".to_string(),
        contact_email: "marisol@vegabakery.example".to_string(),
        contact_phone: Some("(303) 555-0142".to_string()),
        business_name: Some("Vega Bakery".to_string()),
        business_type: business_type.map(str::to_string),
        budget_range: budget_range.map(str::to_string),
        timeline: timeline.map(str::to_string),
        current_website_status: website.map(str::to_string),
        requested_services: vec![
            "Website Development".to_string(),
            "SEO Optimization".to_string(),
        ],
        project_details: Some("Online ordering for wedding cakes".to_string()),
    }
}

/// e-commerce(15) + over-10000(20) + asap(15) + none(20) = 70
pub(super) fn high_value_inquiry() -> InquiryInput {
    inquiry(
        Some("e-commerce"),
        Some("over-10000"),
        Some("asap"),
        Some("none"),
    )
}

/// other(5) + under-1000(5) + exploring(5) + professional(5) = 20
pub(super) fn low_value_inquiry() -> InquiryInput {
    inquiry(
        Some("other"),
        Some("under-1000"),
        Some("exploring"),
        Some("professional"),
    )
}

pub(super) fn build_service() -> (InquiryIntakeService<MemoryDispatcher>, Arc<MemoryDispatcher>) {
    let dispatcher = Arc::new(MemoryDispatcher::default());
    let service = service_with(dispatcher.clone());
    (service, dispatcher)
}

pub(super) fn service_with<D>(dispatcher: Arc<D>) -> InquiryIntakeService<D>
where
    D: NotificationDispatcher + 'static,
{
    InquiryIntakeService::with_clock(
        dispatcher,
        evaluation_config(),
        DeliveryRoute::default(),
        fallback(),
        Arc::new(clock()),
    )
}

pub(super) fn fallback() -> FallbackContact {
    FallbackContact {
        phone: "(303) 555-0100".to_string(),
        email: "studio@example.com".to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryDispatcher {
    sent: Mutex<Vec<(MessageRoute, NotificationPayload)>>,
}

impl MemoryDispatcher {
    pub(super) fn sent(&self) -> Vec<(MessageRoute, NotificationPayload)> {
        self.sent.lock().expect("dispatcher mutex poisoned").clone()
    }
}

impl NotificationDispatcher for MemoryDispatcher {
    fn dispatch(
        &self,
        route: &MessageRoute,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let mut guard = self.sent.lock().expect("dispatcher mutex poisoned");
        guard.push((route.clone(), payload.clone()));
        Ok(DeliveryReceipt {
            message_id: format!("msg-{}", guard.len()),
        })
    }
}

/// Rejects one message kind and accepts the other.
pub(super) struct FailingDispatcher {
    pub(super) failing: MessageKind,
    pub(super) accepted: Mutex<Vec<MessageKind>>,
}

impl FailingDispatcher {
    pub(super) fn failing(kind: MessageKind) -> Self {
        Self {
            failing: kind,
            accepted: Mutex::new(Vec::new()),
        }
    }
}

impl NotificationDispatcher for FailingDispatcher {
    fn dispatch(
        &self,
        _route: &MessageRoute,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        if payload.kind() == self.failing {
            return Err(DeliveryError::Transport("smtp relay offline".to_string()));
        }
        self.accepted
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(payload.kind());
        Ok(DeliveryReceipt {
            message_id: "accepted".to_string(),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: InquiryIntakeService<MemoryDispatcher>) -> axum::Router {
    inquiry_router(Arc::new(service))
}
