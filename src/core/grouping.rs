//! Generic fallback grouping: every attribute the domain extractors did not
//! recognize is still surfaced as ordered (section, label, value) rows, so
//! no payload data is silently dropped.
//!
//! The walk is guarded against hostile payloads: bounded depth, bounded item
//! count and a value-length cap for junk concatenations.

use crate::domain::model::{DetailItem, DetailSection, RawPayload};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;

const GENERAL_SECTION: &str = "General";

/// Administrative keys that never belong in a detail view.
const SKIP_KEYS: &[&str] = &[
    "id",
    "status",
    "url",
    "slug",
    "source",
    "source_id",
    "broker_id",
    "price",
    "price_raw",
    "currency",
    "hash",
];

const MAX_DEPTH: usize = 6;
const MAX_ITEMS: usize = 500;
const MAX_VALUE_LEN: usize = 300;

/// Internal bookkeeping keys: leading underscore, the skip-list, and
/// timestamp columns ("created_at" and friends).
pub fn is_internal_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.starts_with('_') || SKIP_KEYS.contains(&key.as_str()) || key.ends_with("_at")
}

pub fn group_generic_details(payload: &RawPayload) -> Vec<DetailSection> {
    let mut sections: BTreeMap<String, Vec<DetailItem>> = BTreeMap::new();
    let mut budget = MAX_ITEMS;

    for (key, value) in payload {
        if is_internal_key(key) {
            continue;
        }
        match value {
            Value::Object(map) => {
                flatten_object(&mut sections, &humanize(key), "", map, 1, &mut budget);
            }
            Value::Array(items) => {
                let name = humanize(key);
                flatten_array(&mut sections, &name, &name, items, 1, &mut budget);
            }
            scalar => {
                let (section, label) = split_composite(key);
                push_item(&mut sections, section, label, scalar, &mut budget);
            }
        }
    }

    let mut out: Vec<DetailSection> = sections
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(section, items)| DetailSection { section, items })
        .collect();
    // BTreeMap already gave alphabetical order; the catch-all bucket goes last.
    if let Some(pos) = out.iter().position(|s| s.section == GENERAL_SECTION) {
        let general = out.remove(pos);
        out.push(general);
    }
    out
}

fn flatten_object(
    sections: &mut BTreeMap<String, Vec<DetailItem>>,
    section: &str,
    prefix: &str,
    map: &serde_json::Map<String, Value>,
    depth: usize,
    budget: &mut usize,
) {
    if depth > MAX_DEPTH || *budget == 0 {
        return;
    }
    for (key, value) in map {
        if is_internal_key(key) {
            continue;
        }
        let label = join_label(prefix, &humanize(key));
        match value {
            Value::Object(inner) => {
                flatten_object(sections, section, &label, inner, depth + 1, budget);
            }
            Value::Array(items) => {
                flatten_array(sections, section, &label, items, depth + 1, budget);
            }
            scalar => push_item(sections, section.to_string(), label, scalar, budget),
        }
    }
}

fn flatten_array(
    sections: &mut BTreeMap<String, Vec<DetailItem>>,
    section: &str,
    prefix: &str,
    items: &[Value],
    depth: usize,
    budget: &mut usize,
) {
    if depth > MAX_DEPTH || *budget == 0 {
        return;
    }
    for (index, value) in items.iter().enumerate() {
        // Index suffix only when there is more than one element.
        let label = if items.len() > 1 {
            format!("{} {}", prefix, index + 1)
        } else {
            prefix.to_string()
        };
        match value {
            Value::Object(inner) => {
                flatten_object(sections, section, &label, inner, depth + 1, budget);
            }
            Value::Array(inner) => {
                flatten_array(sections, section, &label, inner, depth + 1, budget);
            }
            scalar => push_item(sections, section.to_string(), label, scalar, budget),
        }
    }
}

fn push_item(
    sections: &mut BTreeMap<String, Vec<DetailItem>>,
    section: String,
    label: String,
    value: &Value,
    budget: &mut usize,
) {
    if *budget == 0 {
        return;
    }
    let Some(rendered) = format_value(value) else {
        return;
    };
    // Overlong scalars are junk concatenations, not display data.
    if rendered.len() > MAX_VALUE_LEN {
        return;
    }
    *budget -= 1;
    sections
        .entry(section)
        .or_default()
        .push(DetailItem { label, value: rendered });
}

/// Composite keys carry their own section: "motor > pk" or
/// "overige - bijzonderheden". Plain keys land in the catch-all bucket.
fn split_composite(key: &str) -> (String, String) {
    for separator in [" > ", " - "] {
        if let Some((section, label)) = key.split_once(separator) {
            return (humanize(section), humanize(label));
        }
    }
    (GENERAL_SECTION.to_string(), humanize(key))
}

/// "main_engine_1" -> "Main engine 1", "buildYear" -> "Build year".
fn humanize(raw: &str) -> String {
    let mut spaced = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for ch in raw.trim().chars() {
        if ch == '_' {
            spaced.push(' ');
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            spaced.push(' ');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        spaced.push(ch);
    }

    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => collapsed,
    }
}

fn join_label(prefix: &str, part: &str) -> String {
    if prefix.is_empty() {
        return part.to_string();
    }
    // Only the first word of a composed label keeps its capital.
    let mut chars = part.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("{} {}", prefix, lowered)
}

fn format_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Number(n) => Some(format_number(n)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(format_date(trimmed).unwrap_or_else(|| trimmed.to_string()))
        }
        // Containers are handled by the flattening walk, not rendered inline.
        _ => None,
    }
}

fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// ISO-8601-looking strings read better as a plain local date.
fn format_date(s: &str) -> Option<String> {
    let date_part = s.split('T').next().unwrap_or(s);
    if date_part.len() != 10 {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    Some(parsed.format("%d-%m-%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> RawPayload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn composite_key_becomes_section_and_label() {
        let p = payload(json!({"overige - bijzonderheden": "Recent geschilderd"}));
        let groups = group_generic_details(&p);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].section, "Overige");
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].label, "Bijzonderheden");
        assert_eq!(groups[0].items[0].value, "Recent geschilderd");
    }

    #[test]
    fn claimed_keys_still_grouped() {
        // Keys consumed by a domain extractor stay visible in the generic
        // "show all details" listing; see DESIGN.md.
        let p = payload(json!({
            "motor > type": "Volvo Penta",
            "motor > pk": "320"
        }));
        let groups = group_generic_details(&p);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].section, "Motor");
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn plain_keys_land_in_general_which_sorts_last() {
        let p = payload(json!({
            "lengte": "39.50",
            "afmetingen > breedte": "5.05",
            "zzz > diepte": "1.40"
        }));
        let groups = group_generic_details(&p);
        let names: Vec<&str> = groups.iter().map(|g| g.section.as_str()).collect();
        assert_eq!(names, vec!["Afmetingen", "Zzz", "General"]);
    }

    #[test]
    fn nested_objects_use_outer_key_as_section() {
        let p = payload(json!({
            "motoren": {
                "hoofdmotor": {"type": "DAF", "pk": 230},
                "keerkoppeling": "Twin Disc"
            }
        }));
        let groups = group_generic_details(&p);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].section, "Motoren");
        let labels: Vec<&str> = groups[0].items.iter().map(|i| i.label.as_str()).collect();
        assert!(labels.contains(&"Hoofdmotor type"));
        assert!(labels.contains(&"Hoofdmotor pk"));
        assert!(labels.contains(&"Keerkoppeling"));
    }

    #[test]
    fn multi_element_arrays_get_index_suffixes() {
        let p = payload(json!({
            "tanks": [
                {"inhoud": 500},
                {"inhoud": 300}
            ],
            "fotos": ["a.jpg"]
        }));
        let groups = group_generic_details(&p);
        let tanks = groups.iter().find(|g| g.section == "Tanks").unwrap();
        let labels: Vec<&str> = tanks.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Tanks 1 inhoud", "Tanks 2 inhoud"]);

        let fotos = groups.iter().find(|g| g.section == "Fotos").unwrap();
        assert_eq!(fotos.items[0].label, "Fotos");
        assert_eq!(fotos.items[0].value, "a.jpg");
    }

    #[test]
    fn internal_keys_are_skipped_everywhere() {
        let p = payload(json!({
            "_internal_flag": true,
            "status": "active",
            "scraped_at": "2024-01-01T10:00:00Z",
            "details": {"_rev": 3, "kleur": "blauw"}
        }));
        let groups = group_generic_details(&p);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].section, "Details");
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].label, "Kleur");
    }

    #[test]
    fn booleans_and_dates_are_rendered_for_humans() {
        let p = payload(json!({
            "boegschroef aanwezig": true,
            "gekeurd": false,
            "keuring geldig tot": "2027-06-15",
            "laatste keuring": "2023-05-01T09:30:00Z"
        }));
        let groups = group_generic_details(&p);
        let general = &groups[0];
        let value_of = |label: &str| {
            general
                .items
                .iter()
                .find(|i| i.label == label)
                .map(|i| i.value.clone())
                .unwrap()
        };
        assert_eq!(value_of("Boegschroef aanwezig"), "Yes");
        assert_eq!(value_of("Gekeurd"), "No");
        assert_eq!(value_of("Keuring geldig tot"), "15-06-2027");
        assert_eq!(value_of("Laatste keuring"), "01-05-2023");
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        let p = payload(json!({"aantal ruimen": 2.0, "diepgang": 2.55}));
        let groups = group_generic_details(&p);
        let general = &groups[0];
        assert!(general.items.iter().any(|i| i.value == "2"));
        assert!(general.items.iter().any(|i| i.value == "2.55"));
    }

    #[test]
    fn overlong_values_are_dropped_as_junk() {
        let p = payload(json!({
            "blob": "x".repeat(2000),
            "kleur": "blauw"
        }));
        let groups = group_generic_details(&p);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].label, "Kleur");
    }

    #[test]
    fn pathological_nesting_is_bounded() {
        let mut value = json!("leaf");
        for _ in 0..50 {
            value = json!({"diep": value});
        }
        let p = payload(json!({"wrapper": value}));
        // Must terminate and yield nothing past the depth guard.
        let groups = group_generic_details(&p);
        assert!(groups.is_empty() || groups[0].items.len() <= 1);
    }

    #[test]
    fn empty_payload_groups_to_nothing() {
        assert!(group_generic_details(&RawPayload::new()).is_empty());
    }
}
