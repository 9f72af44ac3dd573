mod config;
mod policy;
mod rules;

pub use config::{
    BudgetBand, BudgetScale, EvaluationConfig, MessageSettings, ProfileError, ResponseWindows,
    ScoreWeights, TierThresholds,
};

use super::clock::Clock;
use super::domain::{Dimension, InquiryInput, PriorityTier};
use super::notifications::{self, Acknowledgement, InternalAlert, LeadSummary, NotificationPayload};
use super::validation::{validate_identity, ValidationError};
use policy::decide_tier;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying a scoring profile to inquiries.
#[derive(Debug, Clone)]
pub struct LeadEvaluator {
    config: EvaluationConfig,
}

impl LeadEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Validate, score, tier, and build both outbound payloads.
    ///
    /// Pure: the only time source is `clock`, nothing is sent, and `input` is left untouched.
    pub fn evaluate<C>(
        &self,
        input: &InquiryInput,
        clock: &C,
    ) -> Result<EvaluationResult, ValidationError>
    where
        C: Clock + ?Sized,
    {
        validate_identity(input)?;

        let (components, score) = rules::score_inquiry(input, &self.config.weights);
        let decision = decide_tier(score, &self.config);

        let lead = LeadSummary {
            score,
            tier: decision.tier,
            response_time: decision.response_time,
            submitted_at: clock.now(),
        };
        let settings = &self.config.messages;

        Ok(EvaluationResult {
            score,
            tier: decision.tier,
            response_time_promise: decision.response_time.to_string(),
            components,
            confirmation_message: notifications::confirmation_message(input, &lead),
            acknowledgement: notifications::acknowledgement(input, &lead, settings),
            internal_alert: notifications::internal_alert(
                input,
                &lead,
                &self.config.weights,
                settings,
            ),
        })
    }
}

/// Convenience wrapper for one-off evaluations without holding a [`LeadEvaluator`].
pub fn evaluate<C>(
    input: &InquiryInput,
    config: &EvaluationConfig,
    clock: &C,
) -> Result<EvaluationResult, ValidationError>
where
    C: Clock + ?Sized,
{
    LeadEvaluator::new(config.clone()).evaluate(input, clock)
}

/// Contribution of one dimension to the score, kept for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub dimension: Dimension,
    pub value: Option<String>,
    pub recognized: bool,
    pub points: u32,
    pub notes: String,
}

/// Everything the caller needs to notify both parties and answer the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u32,
    pub tier: PriorityTier,
    pub response_time_promise: String,
    pub components: Vec<ScoreComponent>,
    pub confirmation_message: String,
    pub acknowledgement: Acknowledgement,
    pub internal_alert: InternalAlert,
}

impl EvaluationResult {
    /// Both payloads, acknowledgement first.
    pub fn payloads(&self) -> [NotificationPayload; 2] {
        [
            NotificationPayload::Acknowledgement(self.acknowledgement.clone()),
            NotificationPayload::InternalAlert(self.internal_alert.clone()),
        ]
    }

    /// The parts of an evaluation the submitter may see. The internal alert, and with it
    /// the owner's address, stays server-side.
    pub fn submitter_view(&self) -> SubmitterView {
        SubmitterView {
            score: self.score,
            tier: self.tier,
            response_time_promise: self.response_time_promise.clone(),
            components: self.components.clone(),
            confirmation_message: self.confirmation_message.clone(),
            acknowledgement: self.acknowledgement.clone(),
        }
    }
}

/// Public projection of an [`EvaluationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitterView {
    pub score: u32,
    pub tier: PriorityTier,
    pub response_time_promise: String,
    pub components: Vec<ScoreComponent>,
    pub confirmation_message: String,
    pub acknowledgement: Acknowledgement,
}
