use super::super::domain::PriorityTier;
use super::config::EvaluationConfig;

/// Tier decision plus the reply window promised for it.
pub(crate) struct TierDecision<'a> {
    pub tier: PriorityTier,
    pub response_time: &'a str,
}

pub(crate) fn decide_tier(score: u32, config: &EvaluationConfig) -> TierDecision<'_> {
    let tier = config.thresholds.tier_for(score);
    TierDecision {
        tier,
        response_time: config.response_windows.for_tier(tier),
    }
}
