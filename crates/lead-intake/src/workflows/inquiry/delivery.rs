use serde::{Deserialize, Serialize};

use super::notifications::{MessageKind, NotificationPayload};

/// Outbound message hook (transactional e-mail API, queue, etc.).
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(
        &self,
        route: &MessageRoute,
        payload: &NotificationPayload,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Service/template identifier pair understood by the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRoute {
    pub service_id: String,
    pub template_id: String,
}

/// Provider routing for both message kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRoute {
    pub service_id: String,
    pub acknowledgement_template: String,
    pub internal_alert_template: String,
}

impl DeliveryRoute {
    pub fn route_for(&self, kind: MessageKind) -> MessageRoute {
        let template_id = match kind {
            MessageKind::Acknowledgement => &self.acknowledgement_template,
            MessageKind::InternalAlert => &self.internal_alert_template,
        };
        MessageRoute {
            service_id: self.service_id.clone(),
            template_id: template_id.clone(),
        }
    }
}

impl Default for DeliveryRoute {
    fn default() -> Self {
        Self {
            service_id: "lead-intake".to_string(),
            acknowledgement_template: "client_autoresponder".to_string(),
            internal_alert_template: "business_notification".to_string(),
        }
    }
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery transport unavailable: {0}")]
    Transport(String),
    #[error("delivery provider rejected message: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered { message_id: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub kind: MessageKind,
    pub template_id: String,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    pub(crate) fn from_result(
        kind: MessageKind,
        route: &MessageRoute,
        result: Result<DeliveryReceipt, DeliveryError>,
    ) -> Self {
        let status = match result {
            Ok(receipt) => DeliveryStatus::Delivered {
                message_id: receipt.message_id,
            },
            Err(err) => DeliveryStatus::Failed {
                reason: err.to_string(),
            },
        };
        Self {
            kind,
            template_id: route.template_id.clone(),
            status,
        }
    }

    pub fn delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered { .. })
    }
}

/// Per-message results of one delivery attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(DeliveryOutcome::delivered)
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.delivered())
    }

    pub fn failure_summary(&self) -> String {
        self.failures()
            .map(|outcome| match &outcome.status {
                DeliveryStatus::Failed { reason } => {
                    format!("{} ({reason})", outcome.kind.label())
                }
                DeliveryStatus::Delivered { .. } => outcome.kind.label().to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Phone and e-mail the submitter is pointed to when delivery fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackContact {
    pub phone: String,
    pub email: String,
}

impl FallbackContact {
    pub fn failure_message(&self) -> String {
        format!(
            "Sorry, there was an error sending your message. Please try calling us directly at {} or emailing {}.",
            self.phone, self.email
        )
    }
}

impl Default for FallbackContact {
    fn default() -> Self {
        Self {
            phone: "(555) 010-0199".to_string(),
            email: "hello@example.com".to_string(),
        }
    }
}
