//! Category normalization.
//!
//! Maps raw classifier output of unknown shape into a de-duplicated,
//! order-preserving set of valid categories. Invalid elements are discarded
//! silently; an empty result falls back to `[UNCLASSIFIED]`.

use serde_json::Value;

use super::IntentCategory;

/// Normalizes a raw category proposal into the closed set.
///
/// Accepts an array of tags, a comma-delimited string (possibly carrying
/// list punctuation like `["A", "B"]`), or anything else. The result is
/// never empty.
pub fn normalize_categories(raw: &Value) -> Vec<IntentCategory> {
    let elements: Vec<String> = match raw {
        Value::Array(items) => items.iter().map(element_text).collect(),
        Value::String(s) => split_delimited(s),
        _ => Vec::new(),
    };

    let mut categories: Vec<IntentCategory> = Vec::new();
    for element in &elements {
        if let Ok(category) = element.trim().to_uppercase().parse::<IntentCategory>() {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }

    if categories.is_empty() {
        categories.push(IntentCategory::Unclassified);
    }
    categories
}

fn element_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn split_delimited(s: &str) -> Vec<String> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();

    cleaned.split(',').map(str::to_string).collect()
}
