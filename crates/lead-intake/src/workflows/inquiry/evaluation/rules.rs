use std::collections::BTreeMap;

use super::super::domain::{
    BusinessType, Category, Dimension, InquiryInput, Timeline, WebsiteStatus,
};
use super::config::{weight_of, BudgetScale, ScoreWeights};
use super::ScoreComponent;

/// Score every dimension, in [`Dimension::ALL`] order, and return the components with their sum.
pub(crate) fn score_inquiry(
    input: &InquiryInput,
    weights: &ScoreWeights,
) -> (Vec<ScoreComponent>, u32) {
    let components: Vec<ScoreComponent> = Dimension::ALL
        .iter()
        .map(|dimension| {
            let raw = input.answer(*dimension);
            match dimension {
                Dimension::BusinessType => {
                    score_dimension::<BusinessType>(raw, &weights.business_type)
                }
                Dimension::BudgetRange => score_budget(raw, &weights.budget_range),
                Dimension::Timeline => score_dimension::<Timeline>(raw, &weights.timeline),
                Dimension::WebsiteStatus => {
                    score_dimension::<WebsiteStatus>(raw, &weights.website_status)
                }
            }
        })
        .collect();

    let total = components
        .iter()
        .fold(0u32, |total, component| total.saturating_add(component.points));

    (components, total)
}

fn score_dimension<C: Category>(raw: Option<&str>, table: &BTreeMap<C, u32>) -> ScoreComponent {
    let Some(value) = raw else {
        return unanswered(C::DIMENSION);
    };

    match C::from_key(value) {
        Some(category) => recognized(
            C::DIMENSION,
            value,
            category.label(),
            weight_of(table, category),
        ),
        None => unrecognized(C::DIMENSION, value),
    }
}

fn score_budget(raw: Option<&str>, scale: &BudgetScale) -> ScoreComponent {
    let Some(value) = raw else {
        return unanswered(Dimension::BudgetRange);
    };

    match scale.find(value) {
        Some(band) => recognized(Dimension::BudgetRange, value, &band.label, band.points),
        None => unrecognized(Dimension::BudgetRange, value),
    }
}

fn unanswered(dimension: Dimension) -> ScoreComponent {
    ScoreComponent {
        dimension,
        value: None,
        recognized: false,
        points: 0,
        notes: "not answered".to_string(),
    }
}

fn recognized(dimension: Dimension, value: &str, label: &str, points: u32) -> ScoreComponent {
    ScoreComponent {
        dimension,
        value: Some(value.to_string()),
        recognized: true,
        points,
        notes: format!("{label} scores {points}"),
    }
}

fn unrecognized(dimension: Dimension, value: &str) -> ScoreComponent {
    ScoreComponent {
        dimension,
        value: Some(value.to_string()),
        recognized: false,
        points: 0,
        notes: format!("unrecognized {dimension} '{value}'"),
    }
}
