use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{BusinessType, Category, PriorityTier, Timeline, WebsiteStatus};

const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60;

/// Scoring profile for one site deployment: weights, tier cutoffs, and message defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub weights: ScoreWeights,
    pub thresholds: TierThresholds,
    #[serde(default)]
    pub response_windows: ResponseWindows,
    #[serde(default)]
    pub messages: MessageSettings,
}

impl EvaluationConfig {
    /// Web-agency contact form profile.
    pub fn standard() -> Self {
        Self {
            weights: ScoreWeights::standard(),
            thresholds: TierThresholds {
                high: 45,
                medium: 25,
            },
            response_windows: ResponseWindows::default(),
            messages: MessageSettings::default(),
        }
    }

    /// Quote-request form profile: finer budget bands topping out at $5,000 and a lower HIGH cutoff.
    pub fn quote_desk() -> Self {
        let weights = ScoreWeights {
            budget_range: BudgetScale::quote_desk(),
            ..ScoreWeights::standard()
        };

        Self {
            weights,
            thresholds: TierThresholds {
                high: 40,
                medium: 25,
            },
            response_windows: ResponseWindows::default(),
            messages: MessageSettings::default(),
        }
    }

    /// Resolve a named preset (`standard`, `quote-desk`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" | "web-agency" => Some(Self::standard()),
            "quote-desk" | "quote_desk" | "quote" => Some(Self::quote_desk()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        self.thresholds.validate()?;
        self.weights.budget_range.validate()?;

        if self.messages.display_utc_offset_minutes.abs() >= MAX_UTC_OFFSET_MINUTES {
            return Err(ProfileError::InvalidUtcOffset(
                self.messages.display_utc_offset_minutes,
            ));
        }

        Ok(())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Point values per answer, one table per dimension. Answers missing from a table score zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default)]
    pub business_type: BTreeMap<BusinessType, u32>,
    #[serde(default)]
    pub budget_range: BudgetScale,
    #[serde(default)]
    pub timeline: BTreeMap<Timeline, u32>,
    #[serde(default)]
    pub website_status: BTreeMap<WebsiteStatus, u32>,
}

impl ScoreWeights {
    pub fn standard() -> Self {
        Self {
            business_type: BTreeMap::from([
                (BusinessType::LocalBusiness, 10),
                (BusinessType::ECommerce, 15),
                (BusinessType::ProfessionalServices, 12),
                (BusinessType::Nonprofit, 8),
                (BusinessType::Startup, 12),
                (BusinessType::Other, 5),
            ]),
            budget_range: BudgetScale::standard(),
            timeline: BTreeMap::from([
                (Timeline::Asap, 15),
                (Timeline::WithinMonth, 12),
                (Timeline::WithinQuarter, 8),
                (Timeline::Exploring, 5),
            ]),
            website_status: BTreeMap::from([
                (WebsiteStatus::NoWebsite, 20),
                (WebsiteStatus::Outdated, 15),
                (WebsiteStatus::DiyPlatform, 12),
                (WebsiteStatus::Professional, 5),
            ]),
        }
    }
}

pub(crate) fn weight_of<C: Category>(table: &BTreeMap<C, u32>, category: C) -> u32 {
    table.get(&category).copied().unwrap_or(0)
}

/// One answer to a site's budget question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBand {
    pub key: String,
    pub label: String,
    pub points: u32,
}

impl BudgetBand {
    fn new(key: &str, label: &str, points: u32) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            points,
        }
    }
}

/// Budget answers offered by one site.
///
/// Each deployment asks its own budget question, so the answers live in the profile rather
/// than in a closed enum. `bands` run from the smallest to the largest engagement and must
/// never lose points along the way. `unranked` holds answers outside that order, such as
/// "not sure yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetScale {
    pub bands: Vec<BudgetBand>,
    #[serde(default)]
    pub unranked: Vec<BudgetBand>,
}

impl BudgetScale {
    /// Web-agency form: four bands up to "over $10,000".
    pub fn standard() -> Self {
        Self {
            bands: vec![
                BudgetBand::new("under-1000", "Under $1,000", 5),
                BudgetBand::new("1000-5000", "$1,000 - $5,000", 10),
                BudgetBand::new("5000-10000", "$5,000 - $10,000", 15),
                BudgetBand::new("over-10000", "Over $10,000", 20),
            ],
            unranked: Vec::new(),
        }
    }

    /// Quote-request form: five bands up to "over $5,000" plus "not sure yet".
    pub fn quote_desk() -> Self {
        Self {
            bands: vec![
                BudgetBand::new("under-500", "Under $500", 5),
                BudgetBand::new("500-1000", "$500 - $1,000", 8),
                BudgetBand::new("1000-2500", "$1,000 - $2,500", 12),
                BudgetBand::new("2500-5000", "$2,500 - $5,000", 15),
                BudgetBand::new("over-5000", "Over $5,000", 20),
            ],
            unranked: vec![BudgetBand::new("not-sure", "Not sure yet", 8)],
        }
    }

    /// Band submitted under `raw`, ranked or not. Surrounding whitespace is ignored.
    pub fn find(&self, raw: &str) -> Option<&BudgetBand> {
        let raw = raw.trim();
        self.bands
            .iter()
            .chain(&self.unranked)
            .find(|band| band.key == raw)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.bands.len() + self.unranked.len());
        for band in self.bands.iter().chain(&self.unranked) {
            if seen.contains(&band.key.as_str()) {
                return Err(ProfileError::DuplicateBudgetKey(band.key.clone()));
            }
            seen.push(&band.key);
        }

        for pair in self.bands.windows(2) {
            if pair[1].points < pair[0].points {
                return Err(ProfileError::DecreasingBudgetWeights {
                    lower: pair[0].key.clone(),
                    higher: pair[1].key.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Inclusive lower bounds for the HIGH and MEDIUM tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub high: u32,
    pub medium: u32,
}

impl TierThresholds {
    pub fn tier_for(&self, score: u32) -> PriorityTier {
        if score >= self.high {
            PriorityTier::High
        } else if score >= self.medium {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    fn validate(&self) -> Result<(), ProfileError> {
        if self.high < self.medium {
            return Err(ProfileError::ThresholdOrder {
                high: self.high,
                medium: self.medium,
            });
        }
        Ok(())
    }
}

/// Promised reply windows quoted back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseWindows {
    pub high: String,
    pub medium: String,
    pub low: String,
}

impl ResponseWindows {
    pub fn for_tier(&self, tier: PriorityTier) -> &str {
        match tier {
            PriorityTier::High => &self.high,
            PriorityTier::Medium => &self.medium,
            PriorityTier::Low => &self.low,
        }
    }
}

impl Default for ResponseWindows {
    fn default() -> Self {
        Self {
            high: "2 hours".to_string(),
            medium: "6 hours".to_string(),
            low: "24 hours".to_string(),
        }
    }
}

/// Defaults and presentation settings for the two outbound templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    pub owner_email: String,
    pub default_project_type: String,
    pub display_utc_offset_minutes: i32,
    pub display_zone_label: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            owner_email: "leads@example.com".to_string(),
            default_project_type: "Website Development".to_string(),
            display_utc_offset_minutes: -7 * 60,
            display_zone_label: "MT".to_string(),
        }
    }
}

/// Inconsistent scoring profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("high threshold {high} must not be below medium threshold {medium}")]
    ThresholdOrder { high: u32, medium: u32 },
    #[error("budget band '{higher}' is weighted below lower band '{lower}'")]
    DecreasingBudgetWeights { lower: String, higher: String },
    #[error("budget band '{0}' is listed more than once")]
    DuplicateBudgetKey(String),
    #[error("display UTC offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),
}
