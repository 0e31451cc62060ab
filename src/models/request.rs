use serde::Serialize;

use super::input::InputState;

/// Number of recommendations asked for on every request
pub const TOP_K: u32 = 10;

/// JSON body of `POST /recommend`
///
/// Optional filters are left out of the body entirely when their input is
/// empty; they are never sent as `""`, `0` or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub user_item_id: String,
    pub top_k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl RecommendationRequest {
    /// Builds the request body from a snapshot of the form
    pub fn from_input(input: &InputState) -> Self {
        Self {
            user_item_id: input.item_id().trim().to_string(),
            top_k: TOP_K,
            category_name: non_empty(input.category_name()),
            condition: non_empty(input.condition()),
            min_price: parse_price("min_price", input.min_price()),
            max_price: parse_price("max_price", input.max_price()),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses a price filter.
///
/// Empty input means "no filter". Input that does not parse to a finite
/// decimal is also dropped, with a warning, since JSON has no NaN and the
/// backend treats a missing bound as unbounded.
pub fn parse_price(field: &'static str, raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(field, input = %raw, "Ignoring unparsable price filter");
            None
        }
    }
}
