//! Contact-form inquiry intake: scoring, tiering, and notification assembly.
//!
//! A submission is validated, scored against a configurable weight table, bucketed into a
//! priority tier, and turned into two template payloads (an acknowledgement for the submitter
//! and an internal alert for the business owner). Delivery is left to a
//! [`NotificationDispatcher`] supplied by the caller.

pub mod clock;
pub mod delivery;
pub mod domain;
pub(crate) mod evaluation;
pub mod labels;
pub mod notifications;
pub mod router;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use delivery::{
    DeliveryError, DeliveryOutcome, DeliveryReceipt, DeliveryReport, DeliveryRoute,
    DeliveryStatus, FallbackContact, MessageRoute, NotificationDispatcher,
};
pub use domain::{
    BusinessType, Category, Dimension, InquiryInput, PriorityTier, Timeline, WebsiteStatus,
};
pub use evaluation::{
    evaluate, BudgetBand, BudgetScale, EvaluationConfig, EvaluationResult, LeadEvaluator,
    MessageSettings, ProfileError, ResponseWindows, ScoreComponent, ScoreWeights,
    SubmitterView, TierThresholds,
};
pub use notifications::{Acknowledgement, InternalAlert, MessageKind, NotificationPayload};
pub use router::inquiry_router;
pub use service::{InquiryIntakeService, InquiryStatusView, IntakeReceipt, IntakeServiceError};
pub use validation::ValidationError;
