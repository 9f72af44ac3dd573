use std::sync::Arc;
use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use super::clock::{Clock, SystemClock};
use super::delivery::{
    DeliveryError, DeliveryOutcome, DeliveryReport, DeliveryRoute, FallbackContact,
    NotificationDispatcher,
};
use super::domain::{InquiryInput, PriorityTier};
use super::evaluation::{EvaluationConfig, EvaluationResult, LeadEvaluator};
use super::validation::ValidationError;

/// Service composing the evaluator with the outbound delivery collaborator.
pub struct InquiryIntakeService<D> {
    evaluator: Arc<LeadEvaluator>,
    dispatcher: Arc<D>,
    route: DeliveryRoute,
    fallback: FallbackContact,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<D> InquiryIntakeService<D>
where
    D: NotificationDispatcher + 'static,
{
    pub fn new(
        dispatcher: Arc<D>,
        config: EvaluationConfig,
        route: DeliveryRoute,
        fallback: FallbackContact,
    ) -> Self {
        Self::with_clock(dispatcher, config, route, fallback, Arc::new(SystemClock))
    }

    pub fn with_clock(
        dispatcher: Arc<D>,
        config: EvaluationConfig,
        route: DeliveryRoute,
        fallback: FallbackContact,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            evaluator: Arc::new(LeadEvaluator::new(config)),
            dispatcher,
            route,
            fallback,
            clock,
        }
    }

    pub fn fallback(&self) -> &FallbackContact {
        &self.fallback
    }

    /// Evaluate without notifying anyone.
    pub fn preview(&self, input: &InquiryInput) -> Result<EvaluationResult, ValidationError> {
        self.evaluator.evaluate(input, self.clock.as_ref())
    }

    /// Evaluate a submission and send both notifications.
    pub fn submit(&self, input: &InquiryInput) -> Result<IntakeReceipt, IntakeServiceError> {
        let evaluation = match self.preview(input) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(field = err.field(), "inquiry rejected");
                return Err(err.into());
            }
        };

        info!(
            score = evaluation.score,
            tier = evaluation.tier.label(),
            "inquiry evaluated"
        );

        self.dispatch(evaluation)
    }

    /// Send the payloads of an existing evaluation without recomputing it.
    ///
    /// Meant for server-side retries of an evaluation this service produced. The internal
    /// alert is always addressed to the configured owner, whatever the evaluation says.
    pub fn redeliver(
        &self,
        mut evaluation: EvaluationResult,
    ) -> Result<IntakeReceipt, IntakeServiceError> {
        let owner_email = &self.evaluator.config().messages.owner_email;
        if evaluation.internal_alert.to_email != *owner_email {
            warn!("internal alert recipient differs from configured owner; re-addressing");
            evaluation.internal_alert.to_email = owner_email.clone();
        }

        self.dispatch(evaluation)
    }

    fn dispatch(&self, evaluation: EvaluationResult) -> Result<IntakeReceipt, IntakeServiceError> {
        let delivery = self.deliver(&evaluation);

        if !delivery.is_complete() {
            warn!(
                tier = evaluation.tier.label(),
                failures = %delivery.failure_summary(),
                "inquiry notifications incomplete"
            );
            return Err(IntakeServiceError::Delivery {
                evaluation: Box::new(evaluation),
                report: delivery,
            });
        }

        let confirmation = evaluation.confirmation_message.clone();
        Ok(IntakeReceipt {
            evaluation,
            delivery,
            confirmation,
        })
    }

    /// Dispatch both payloads in parallel and collect per-message outcomes.
    pub fn deliver(&self, evaluation: &EvaluationResult) -> DeliveryReport {
        let payloads = evaluation.payloads();
        let dispatcher = self.dispatcher.as_ref();
        let route = &self.route;

        let outcomes: Vec<DeliveryOutcome> = thread::scope(|scope| {
            let pending: Vec<_> = payloads
                .iter()
                .map(|payload| {
                    let kind = payload.kind();
                    let message_route = route.route_for(kind);
                    let handle = scope.spawn({
                        let message_route = message_route.clone();
                        move || dispatcher.dispatch(&message_route, payload)
                    });
                    (kind, message_route, handle)
                })
                .collect();

            pending
                .into_iter()
                .map(|(kind, message_route, handle)| {
                    let result = handle.join().unwrap_or_else(|_| {
                        Err(DeliveryError::Transport("dispatcher panicked".to_string()))
                    });
                    DeliveryOutcome::from_result(kind, &message_route, result)
                })
                .collect()
        });

        DeliveryReport { outcomes }
    }
}

/// Successful intake: evaluation plus proof that both messages were accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeReceipt {
    pub evaluation: EvaluationResult,
    pub delivery: DeliveryReport,
    pub confirmation: String,
}

impl IntakeReceipt {
    pub fn status_view(&self) -> InquiryStatusView {
        InquiryStatusView {
            score: self.evaluation.score,
            tier: self.evaluation.tier,
            priority_class: self.evaluation.tier.css_class(),
            response_time: self.evaluation.response_time_promise.clone(),
            message: self.confirmation.clone(),
        }
    }
}

/// Public response for a submitted inquiry.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryStatusView {
    pub score: u32,
    pub tier: PriorityTier,
    pub priority_class: &'static str,
    pub response_time: String,
    pub message: String,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("notification delivery failed: {}", .report.failure_summary())]
    Delivery {
        evaluation: Box<EvaluationResult>,
        report: DeliveryReport,
    },
}
