use std::fmt;

use serde::{Deserialize, Serialize};

/// Contact-form submission as received from the marketing site.
///
/// Categorical answers stay as raw strings so that values the scorer does not know yet
/// (a new dropdown option shipped on the site before the weight table was updated) are
/// scored as zero instead of rejecting the whole inquiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryInput {
    pub contact_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub current_website_status: Option<String>,
    #[serde(default)]
    pub requested_services: Vec<String>,
    #[serde(default)]
    pub project_details: Option<String>,
}

impl InquiryInput {
    /// Raw answer for a scoring dimension, `None` when absent or blank.
    pub fn answer(&self, dimension: Dimension) -> Option<&str> {
        let raw = match dimension {
            Dimension::BusinessType => self.business_type.as_deref(),
            Dimension::BudgetRange => self.budget_range.as_deref(),
            Dimension::Timeline => self.timeline.as_deref(),
            Dimension::WebsiteStatus => self.current_website_status.as_deref(),
        };
        raw.filter(|value| !value.trim().is_empty())
    }

    /// Requested services with blanks and duplicates removed, first occurrence wins.
    pub fn distinct_services(&self) -> Vec<&str> {
        let mut services: Vec<&str> = Vec::with_capacity(self.requested_services.len());
        for service in &self.requested_services {
            let service = service.trim();
            if !service.is_empty() && !services.contains(&service) {
                services.push(service);
            }
        }
        services
    }
}

/// The four categorical questions that contribute to a lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    BusinessType,
    BudgetRange,
    Timeline,
    WebsiteStatus,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::BusinessType,
        Dimension::BudgetRange,
        Dimension::Timeline,
        Dimension::WebsiteStatus,
    ];

    /// Form field name carrying this dimension.
    pub const fn field_name(self) -> &'static str {
        match self {
            Dimension::BusinessType => "businessType",
            Dimension::BudgetRange => "budgetRange",
            Dimension::Timeline => "timeline",
            Dimension::WebsiteStatus => "currentWebsiteStatus",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Closed set of answers for one dimension, listed in ascending order.
pub trait Category: Copy + Ord + fmt::Debug + 'static {
    const DIMENSION: Dimension;
    const ALL: &'static [Self];

    /// Wire value submitted by the form.
    fn key(self) -> &'static str;

    /// Human readable label used in notification templates.
    fn label(self) -> &'static str;

    fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|category| category.key() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessType {
    LocalBusiness,
    ECommerce,
    ProfessionalServices,
    Nonprofit,
    Startup,
    Other,
}

impl Category for BusinessType {
    const DIMENSION: Dimension = Dimension::BusinessType;
    const ALL: &'static [Self] = &[
        BusinessType::LocalBusiness,
        BusinessType::ECommerce,
        BusinessType::ProfessionalServices,
        BusinessType::Nonprofit,
        BusinessType::Startup,
        BusinessType::Other,
    ];

    fn key(self) -> &'static str {
        match self {
            BusinessType::LocalBusiness => "local-business",
            BusinessType::ECommerce => "e-commerce",
            BusinessType::ProfessionalServices => "professional-services",
            BusinessType::Nonprofit => "nonprofit",
            BusinessType::Startup => "startup",
            BusinessType::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BusinessType::LocalBusiness => "Local Business",
            BusinessType::ECommerce => "E-commerce",
            BusinessType::ProfessionalServices => "Professional Services",
            BusinessType::Nonprofit => "Non-profit",
            BusinessType::Startup => "Startup",
            BusinessType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeline {
    Asap,
    WithinMonth,
    WithinQuarter,
    Exploring,
}

impl Category for Timeline {
    const DIMENSION: Dimension = Dimension::Timeline;
    const ALL: &'static [Self] = &[
        Timeline::Asap,
        Timeline::WithinMonth,
        Timeline::WithinQuarter,
        Timeline::Exploring,
    ];

    fn key(self) -> &'static str {
        match self {
            Timeline::Asap => "asap",
            Timeline::WithinMonth => "within-month",
            Timeline::WithinQuarter => "within-quarter",
            Timeline::Exploring => "exploring",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Timeline::Asap => "ASAP",
            Timeline::WithinMonth => "Within 1 month",
            Timeline::WithinQuarter => "Within 3 months",
            Timeline::Exploring => "Just exploring",
        }
    }
}

/// State of the prospect's current web presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebsiteStatus {
    #[serde(rename = "none")]
    NoWebsite,
    Outdated,
    DiyPlatform,
    Professional,
}

impl Category for WebsiteStatus {
    const DIMENSION: Dimension = Dimension::WebsiteStatus;
    const ALL: &'static [Self] = &[
        WebsiteStatus::NoWebsite,
        WebsiteStatus::Outdated,
        WebsiteStatus::DiyPlatform,
        WebsiteStatus::Professional,
    ];

    fn key(self) -> &'static str {
        match self {
            WebsiteStatus::NoWebsite => "none",
            WebsiteStatus::Outdated => "outdated",
            WebsiteStatus::DiyPlatform => "diy-platform",
            WebsiteStatus::Professional => "professional",
        }
    }

    fn label(self) -> &'static str {
        match self {
            WebsiteStatus::NoWebsite => "No website",
            WebsiteStatus::Outdated => "Outdated website",
            WebsiteStatus::DiyPlatform => "DIY Platform (Wix/Squarespace)",
            WebsiteStatus::Professional => "Professional website",
        }
    }
}

/// Coarse priority bucket used to set response-time expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::High => "HIGH",
            PriorityTier::Medium => "MEDIUM",
            PriorityTier::Low => "LOW",
        }
    }

    /// Lower-case form used by the alert template for styling.
    pub const fn css_class(self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
