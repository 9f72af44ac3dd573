use chrono::{DateTime, Utc};
use lead_intake::config::ConfigError;
use lead_intake::workflows::inquiry::{
    DeliveryError, DeliveryReceipt, EvaluationConfig, MessageRoute, NotificationDispatcher,
    NotificationPayload,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Records every dispatched payload; used by the demo and route tests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDispatcher {
    events: Arc<Mutex<Vec<(MessageRoute, NotificationPayload)>>>,
}

impl NotificationDispatcher for InMemoryDispatcher {
    fn dispatch(
        &self,
        route: &MessageRoute,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| DeliveryError::Transport("dispatcher mutex poisoned".to_string()))?;
        guard.push((route.clone(), payload.clone()));
        Ok(DeliveryReceipt {
            message_id: format!("memory-{}", guard.len()),
        })
    }
}

impl InMemoryDispatcher {
    pub(crate) fn events(&self) -> Vec<(MessageRoute, NotificationPayload)> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Stand-in for the hosted e-mail provider: accepts every message and logs the route.
#[derive(Default)]
pub(crate) struct TracingDispatcher {
    sequence: AtomicU64,
}

impl NotificationDispatcher for TracingDispatcher {
    fn dispatch(
        &self,
        route: &MessageRoute,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let message_id = format!("{}-{sequence}", route.service_id);

        info!(
            service_id = %route.service_id,
            template_id = %route.template_id,
            kind = payload.kind().label(),
            %message_id,
            "notification dispatched"
        );

        Ok(DeliveryReceipt { message_id })
    }
}

pub(crate) fn evaluation_profile(name: Option<&str>) -> Result<EvaluationConfig, ConfigError> {
    match name {
        Some(name) => EvaluationConfig::preset(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string())),
        None => Ok(EvaluationConfig::default()),
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
