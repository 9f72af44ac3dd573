use super::domain::{BusinessType, Category, Dimension, InquiryInput, Timeline, WebsiteStatus};
use super::evaluation::{BudgetScale, ScoreWeights};

/// Placeholder rendered when a categorical answer was left blank.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Display label for a raw categorical answer.
///
/// Known keys map through the category's label table, unknown values are passed through
/// untouched and blank answers render as [`NOT_SPECIFIED`].
pub fn display_label<C: Category>(raw: Option<&str>) -> String {
    match raw.filter(|value| !value.trim().is_empty()) {
        Some(value) => C::from_key(value)
            .map(|category| category.label().to_string())
            .unwrap_or_else(|| value.to_string()),
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Display label for a budget answer, read from the site's configured bands.
pub fn budget_label(scale: &BudgetScale, raw: Option<&str>) -> String {
    match raw.filter(|value| !value.trim().is_empty()) {
        Some(value) => scale
            .find(value)
            .map(|band| band.label.clone())
            .unwrap_or_else(|| value.to_string()),
        None => NOT_SPECIFIED.to_string(),
    }
}

/// Display label for one of the inquiry's scoring dimensions.
pub fn dimension_label(
    input: &InquiryInput,
    dimension: Dimension,
    weights: &ScoreWeights,
) -> String {
    let raw = input.answer(dimension);
    match dimension {
        Dimension::BusinessType => display_label::<BusinessType>(raw),
        Dimension::BudgetRange => budget_label(&weights.budget_range, raw),
        Dimension::Timeline => display_label::<Timeline>(raw),
        Dimension::WebsiteStatus => display_label::<WebsiteStatus>(raw),
    }
}
