use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Dimension, InquiryInput, PriorityTier};
use super::evaluation::{MessageSettings, ScoreWeights};
use super::labels::dimension_label;

const PHONE_NOT_PROVIDED: &str = "Not provided";
const BUSINESS_NOT_SPECIFIED: &str = "Not specified";
const NO_PROJECT_DETAILS: &str = "No additional details provided";

/// Template parameters for the auto-responder sent back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub to_name: String,
    pub to_email: String,
    pub business_name: String,
    pub project_type: String,
    pub response_time: String,
    pub priority: PriorityTier,
    pub submission_time: String,
    pub submitted_at: DateTime<Utc>,
}

/// Template parameters for the lead alert sent to the business owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalAlert {
    pub to_email: String,
    pub from_name: String,
    pub from_email: String,
    pub phone: String,
    pub business_name: String,
    pub business_type: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub current_website: String,
    pub project_details: String,
    pub lead_score: u32,
    pub priority: PriorityTier,
    pub priority_class: String,
    pub submission_time: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Acknowledgement,
    InternalAlert,
}

impl MessageKind {
    pub const fn label(self) -> &'static str {
        match self {
            MessageKind::Acknowledgement => "acknowledgement",
            MessageKind::InternalAlert => "internal_alert",
        }
    }
}

/// Either outbound message, ready to hand to a delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum NotificationPayload {
    Acknowledgement(Acknowledgement),
    InternalAlert(InternalAlert),
}

impl NotificationPayload {
    pub fn kind(&self) -> MessageKind {
        match self {
            NotificationPayload::Acknowledgement(_) => MessageKind::Acknowledgement,
            NotificationPayload::InternalAlert(_) => MessageKind::InternalAlert,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            NotificationPayload::Acknowledgement(message) => &message.to_email,
            NotificationPayload::InternalAlert(message) => &message.to_email,
        }
    }
}

/// Scoring facts shared by both templates.
pub(crate) struct LeadSummary<'a> {
    pub score: u32,
    pub tier: PriorityTier,
    pub response_time: &'a str,
    pub submitted_at: DateTime<Utc>,
}

pub(crate) fn acknowledgement(
    input: &InquiryInput,
    lead: &LeadSummary<'_>,
    settings: &MessageSettings,
) -> Acknowledgement {
    let contact_name = input.contact_name.trim();
    let business_name = provided(input.business_name.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{contact_name}'s Business"));

    Acknowledgement {
        to_name: contact_name.to_string(),
        to_email: input.contact_email.trim().to_string(),
        business_name,
        project_type: project_type(input, " & ", settings),
        response_time: lead.response_time.to_string(),
        priority: lead.tier,
        submission_time: submission_time(lead.submitted_at, settings),
        submitted_at: lead.submitted_at,
    }
}

pub(crate) fn internal_alert(
    input: &InquiryInput,
    lead: &LeadSummary<'_>,
    weights: &ScoreWeights,
    settings: &MessageSettings,
) -> InternalAlert {
    InternalAlert {
        to_email: settings.owner_email.clone(),
        from_name: input.contact_name.trim().to_string(),
        from_email: input.contact_email.trim().to_string(),
        phone: provided(input.contact_phone.as_deref())
            .unwrap_or(PHONE_NOT_PROVIDED)
            .to_string(),
        business_name: provided(input.business_name.as_deref())
            .unwrap_or(BUSINESS_NOT_SPECIFIED)
            .to_string(),
        business_type: dimension_label(input, Dimension::BusinessType, weights),
        project_type: project_type(input, ", ", settings),
        budget: dimension_label(input, Dimension::BudgetRange, weights),
        timeline: dimension_label(input, Dimension::Timeline, weights),
        current_website: dimension_label(input, Dimension::WebsiteStatus, weights),
        project_details: provided(input.project_details.as_deref())
            .unwrap_or(NO_PROJECT_DETAILS)
            .to_string(),
        lead_score: lead.score,
        priority: lead.tier,
        priority_class: lead.tier.css_class().to_string(),
        submission_time: submission_time(lead.submitted_at, settings),
        submitted_at: lead.submitted_at,
    }
}

/// Submitter-facing confirmation shown once both messages are out.
pub(crate) fn confirmation_message(input: &InquiryInput, lead: &LeadSummary<'_>) -> String {
    let business = provided(input.business_name.as_deref()).unwrap_or("your business");
    format!(
        "Thank you {}! We've received your {} priority inquiry for {}. We'll respond within {} during business hours with a detailed proposal.",
        input.contact_name.trim(),
        lead.tier.css_class(),
        business,
        lead.response_time
    )
}

fn provided(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn project_type(input: &InquiryInput, separator: &str, settings: &MessageSettings) -> String {
    let services = input.distinct_services();
    if services.is_empty() {
        settings.default_project_type.clone()
    } else {
        services.join(separator)
    }
}

/// Wall-clock rendering in the configured zone; an out-of-range offset renders as UTC.
fn submission_time(submitted_at: DateTime<Utc>, settings: &MessageSettings) -> String {
    let configured = settings
        .display_utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt);
    let (offset, zone) = match configured {
        Some(offset) => (offset, settings.display_zone_label.as_str()),
        None => (Utc.fix(), "UTC"),
    };
    let local = submitted_at.with_timezone(&offset);
    format!("{} {zone}", local.format("%A, %B %-d, %Y at %-I:%M %p"))
}
