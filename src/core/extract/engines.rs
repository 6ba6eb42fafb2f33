//! Propulsion extraction: main engines, generators, thrusters, gearboxes.
//!
//! Three source formats are known, tried in order:
//! 1. dense numbered key families ("main_engine_2_hp", "generator_kw"),
//! 2. section-prefixed single values ("motor > pk"),
//! 3. flat minimal keys ("motor", "pk").

use crate::core::{coerce, matcher};
use crate::domain::model::{EngineEntry, EnginePosition, RawPayload};
use serde_json::Value;
use std::collections::BTreeMap;

/// Dense key families and the position tag their entries carry.
/// "thruster" also catches "bow_thruster" via substring matching.
const FAMILIES: &[(&str, EnginePosition)] = &[
    ("main_engine", EnginePosition::Main),
    ("generator", EnginePosition::Generator),
    ("thruster", EnginePosition::Thruster),
    ("gearbox", EnginePosition::Gearbox),
];

/// Key endings that describe a unit's attribute rather than the unit itself.
const FIELD_SUFFIXES: &[&str] = &[
    "_hp",
    "_pk",
    "_kw",
    "_year",
    "_build_year",
    "_bouwjaar",
    "_hours",
    "_uren",
    "_revision",
    "_revisie",
    "_type",
    "_brand",
    "_merk",
];

pub fn extract_engines(payload: &RawPayload) -> Option<Vec<EngineEntry>> {
    let mut entries = dense_entries(payload);
    if entries.is_empty() {
        entries.extend(sectioned_entry(payload));
    }
    if entries.is_empty() {
        entries.extend(flat_entry(payload));
    }
    (!entries.is_empty()).then_some(entries)
}

fn dense_entries(payload: &RawPayload) -> Vec<EngineEntry> {
    let mut entries = Vec::new();
    for (family, position) in FAMILIES {
        // Group the family's keys by numeric unit suffix so that several
        // keys describing the same indexed unit collapse into one entry.
        let mut units: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for (key, _) in matcher::find_all(payload, family) {
            units.entry(unit_suffix(key, family)).or_default().push(key);
        }
        for keys in units.values() {
            if let Some(entry) = build_dense_entry(payload, keys, *position) {
                entries.push(entry);
            }
        }
    }
    entries
}

/// Numeric suffix identifying the unit within its family; unsuffixed keys
/// belong to unit 1.
fn unit_suffix(key: &str, family: &str) -> u32 {
    let lower = key.to_lowercase();
    let rest = match lower.find(family) {
        Some(pos) => &lower[pos + family.len()..],
        None => "",
    };
    let digits: String = rest
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(1)
}

fn build_dense_entry(
    payload: &RawPayload,
    keys: &[&str],
    position: EnginePosition,
) -> Option<EngineEntry> {
    let field = |endings: &[&str]| -> Option<&Value> {
        for ending in endings {
            for key in keys {
                if key.to_lowercase().ends_with(ending) {
                    return payload.get(*key).filter(|v| matcher::is_present(v));
                }
            }
        }
        None
    };

    // The unit's own key (no attribute suffix) carries the name/description.
    let name = keys
        .iter()
        .find(|key| {
            let lower = key.to_lowercase();
            !FIELD_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        })
        .and_then(|key| payload.get(*key))
        .and_then(coerce::text)
        .or_else(|| field(&["_type", "_brand", "_merk"]).and_then(coerce::text));

    let entry = EngineEntry {
        name,
        horsepower: field(&["_hp", "_pk"]).and_then(coerce::numeric),
        kilowatts: field(&["_kw"]).and_then(coerce::numeric),
        build_year: field(&["_build_year", "_bouwjaar", "_year"]).and_then(coerce::year),
        operating_hours: field(&["_hours", "_uren"]).and_then(coerce::hours),
        revision: field(&["_revision", "_revisie"]).and_then(coerce::text),
        position,
    };
    (!entry.is_empty()).then_some(entry)
}

/// Section-prefixed format: one engine description assembled from
/// "motor > …" style composite keys, tagged as the main engine.
fn sectioned_entry(payload: &RawPayload) -> Option<EngineEntry> {
    let entry = EngineEntry {
        name: matcher::first_text(
            payload,
            &[
                "motor > type",
                "motor > merk",
                "motor - type",
                "engine > type",
                "engine > make",
            ],
        ),
        horsepower: matcher::first_numeric(
            payload,
            &["motor > pk", "motor > vermogen", "motor - pk", "engine > hp"],
        ),
        kilowatts: matcher::first_numeric(payload, &["motor > kw", "engine > kw"]),
        build_year: matcher::first_year(
            payload,
            &["motor > bouwjaar", "motor - bouwjaar", "engine > year"],
        ),
        operating_hours: matcher::first_hours(
            payload,
            &["motor > draaiuren", "motor > uren", "engine > hours", "draaiuren"],
        ),
        revision: revision_note(payload),
        position: EnginePosition::Main,
    };
    (!entry.is_empty()).then_some(entry)
}

/// "revision (+hours since revision)" composite when both are reported.
fn revision_note(payload: &RawPayload) -> Option<String> {
    let note = matcher::first_text(
        payload,
        &["motor > revisie", "revisie motor", "engine > revision"],
    )?;
    match matcher::first_hours(
        payload,
        &["uren na revisie", "draaiuren na revisie", "hours since revision"],
    ) {
        Some(since) => Some(format!("{} (+{} uur)", note, since)),
        None => Some(note),
    }
}

/// Last resort: flat lowercase single keys.
fn flat_entry(payload: &RawPayload) -> Option<EngineEntry> {
    let mut entry = EngineEntry::empty(EnginePosition::Main);
    entry.name = matcher::first_text(payload, &["motortype", "motor", "engine"]);
    entry.horsepower = matcher::first_numeric(payload, &["vermogen", "pk", "hp"]);
    (!entry.is_empty()).then_some(entry)
}
