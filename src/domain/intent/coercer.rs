//! Scalar coercion for loosely-typed reasoner output.
//!
//! Confidence, urgency and boolean flags arrive as numbers, quoted numbers,
//! or prose. Coercion clamps to the domain range and falls back to the
//! domain minimum instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Coerces a raw confidence value to the range 0.0..=1.0.
///
/// Unparseable input yields 0.0.
pub fn coerce_confidence(raw: &Value) -> f64 {
    first_number(raw).map(|n| n.clamp(0.0, 1.0)).unwrap_or(0.0)
}

/// Coerces a raw urgency value to an integer in 1..=5.
///
/// Unparseable input yields 1.
pub fn coerce_urgency(raw: &Value) -> u8 {
    first_number(raw)
        .map(|n| (n.round() as i64).clamp(1, 5) as u8)
        .unwrap_or(1)
}

/// Coerces a raw boolean-ish value, falling back to `default`.
///
/// Accepts real booleans and the strings "true"/"false" in any case.
pub fn coerce_flag(raw: &Value, default: bool) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Extracts the first decimal number from a raw value.
fn first_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => NUMBER_RE
            .find(s)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        _ => None,
    }
}
