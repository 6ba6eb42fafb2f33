//! Ranked key-pattern lookup over a raw payload.
//!
//! Sources phrase the same attribute differently ("motor > pk",
//! "main_engine_1_hp", "vermogen"). Each field carries a hand-curated
//! pattern list, most-specific first; the ranking lives in the data so it
//! stays visible and testable.

use crate::core::coerce;
use crate::domain::model::RawPayload;
use serde_json::Value;

/// A value counts as present when it is non-null and, for strings and
/// containers, non-empty. Absence is never coerced to a default.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

/// First present value whose key contains one of `patterns`, checked in
/// pattern order (case-insensitive substring match). Earlier patterns
/// outrank later ones regardless of key order.
pub fn find_first<'a>(payload: &'a RawPayload, patterns: &[&str]) -> Option<&'a Value> {
    for pattern in patterns {
        let needle = pattern.to_lowercase();
        for (key, value) in payload {
            if key.to_lowercase().contains(&needle) && is_present(value) {
                return Some(value);
            }
        }
    }
    None
}

/// Every present (key, value) pair whose key contains `pattern`, for
/// indexed/repeated concepts (a family of "certificaat" keys, numbered
/// engine keys and the like).
pub fn find_all<'a>(payload: &'a RawPayload, pattern: &str) -> Vec<(&'a str, &'a Value)> {
    let needle = pattern.to_lowercase();
    payload
        .iter()
        .filter(|(key, value)| key.to_lowercase().contains(&needle) && is_present(value))
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

pub fn first_text(payload: &RawPayload, patterns: &[&str]) -> Option<String> {
    find_first(payload, patterns).and_then(coerce::text)
}

pub fn first_numeric(payload: &RawPayload, patterns: &[&str]) -> Option<f64> {
    find_first(payload, patterns).and_then(coerce::numeric)
}

pub fn first_year(payload: &RawPayload, patterns: &[&str]) -> Option<u16> {
    find_first(payload, patterns).and_then(coerce::year)
}

pub fn first_hours(payload: &RawPayload, patterns: &[&str]) -> Option<u64> {
    find_first(payload, patterns).and_then(coerce::hours)
}
