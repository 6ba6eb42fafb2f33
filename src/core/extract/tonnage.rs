//! Tonnage-by-draft curve extraction.
//!
//! Tier 1 reads a fixed table of known draft-to-key associations, then a
//! separate "maximum tonnage" key may add one synthetic point. Tiers 2 and 3
//! scan keys containing a domain word and read the draft out of the key text
//! itself ("tonnenmaat bij 2,50 m").

use crate::core::{coerce, matcher};
use crate::domain::model::{RawPayload, TonnagePoint};
use regex::Regex;
use std::sync::LazyLock;

/// Dense-format tonnage columns keyed by draft in meters.
const DRAFT_TABLE: &[(f64, &str)] = &[
    (1.50, "tonnage_1_50"),
    (2.00, "tonnage_2_00"),
    (2.20, "tonnage_2_20"),
    (2.50, "tonnage_2_50"),
    (2.60, "tonnage_2_60"),
    (2.80, "tonnage_2_80"),
    (3.00, "tonnage_3_00"),
    (3.20, "tonnage_3_20"),
    (3.50, "tonnage_3_50"),
    (4.00, "tonnage_4_00"),
];

/// Draft for the synthetic max point when only deeper points are known.
const MAX_DRAFT_STEP: f64 = 0.5;
/// Draft for the synthetic max point when nothing else is known.
const DEFAULT_MAX_DRAFT: f64 = 3.5;

/// Draft embedded in key text, e.g. "laadvermogen 2,50 m" or "tonnage_3_00".
static DRAFT_IN_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)[.,_](\d{2})").unwrap());

pub fn extract_tonnage_curve(payload: &RawPayload) -> Option<Vec<TonnagePoint>> {
    let mut points = table_points(payload);
    dedup_by_tonnage(&mut points);
    append_max_point(payload, &mut points);

    if points.is_empty() {
        points = keyed_points(payload, "tonnenmaat");
    }
    if points.is_empty() {
        points = keyed_points(payload, "laadvermogen");
    }

    points.sort_by(|a, b| {
        a.draft_m
            .partial_cmp(&b.draft_m)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    (!points.is_empty()).then_some(points)
}

fn table_points(payload: &RawPayload) -> Vec<TonnagePoint> {
    let mut points = Vec::new();
    for (draft, key) in DRAFT_TABLE {
        if let Some(tonnage) = matcher::first_numeric(payload, &[key]) {
            if tonnage > 0.0 {
                points.push(TonnagePoint {
                    draft_m: *draft,
                    tonnage_t: tonnage,
                });
            }
        }
    }
    points
}

/// Appends the "maximum tonnage" value as one more point unless that tonnage
/// is already on the curve. Its draft is the vessel's reported draft when
/// known, otherwise one step past the deepest known point, otherwise fixed.
fn append_max_point(payload: &RawPayload, points: &mut Vec<TonnagePoint>) {
    let Some(max_tonnage) = matcher::first_numeric(
        payload,
        &["tonnage_max", "max_tonnage", "maximale tonnage", "tonnage max"],
    ) else {
        return;
    };
    if max_tonnage <= 0.0 || points.iter().any(|p| same_tonnage(p.tonnage_t, max_tonnage)) {
        return;
    }

    let reported_draft = matcher::first_numeric(
        payload,
        &["diepgang_max", "max_diepgang", "diepgang", "draught", "draft"],
    )
    .filter(|d| *d > 0.0);
    let deepest = points.iter().map(|p| p.draft_m).reduce(f64::max);

    let mut draft = reported_draft
        .or_else(|| deepest.map(|d| d + MAX_DRAFT_STEP))
        .unwrap_or(DEFAULT_MAX_DRAFT);
    // A reported draft already on the curve would break the strict draft
    // ordering; move the synthetic point past the deepest known point.
    if points.iter().any(|p| same_draft(p.draft_m, draft)) {
        draft = deepest.map(|d| d + MAX_DRAFT_STEP).unwrap_or(DEFAULT_MAX_DRAFT);
    }
    points.push(TonnagePoint {
        draft_m: draft,
        tonnage_t: max_tonnage,
    });
}

/// Fallback: every key containing `word` whose text embeds a draft value.
fn keyed_points(payload: &RawPayload, word: &str) -> Vec<TonnagePoint> {
    let mut points = Vec::new();
    for (key, value) in matcher::find_all(payload, word) {
        let lowered = key.to_lowercase();
        let Some(caps) = DRAFT_IN_KEY.captures(&lowered) else {
            continue;
        };
        let Ok(draft) = format!("{}.{}", &caps[1], &caps[2]).parse::<f64>() else {
            continue;
        };
        if let Some(tonnage) = coerce::numeric(value).filter(|t| *t > 0.0) {
            points.push(TonnagePoint {
                draft_m: draft,
                tonnage_t: tonnage,
            });
        }
    }
    dedup_by_tonnage(&mut points);
    points
}

/// Keeps the first point per distinct tonnage value.
fn dedup_by_tonnage(points: &mut Vec<TonnagePoint>) {
    let mut seen: Vec<f64> = Vec::new();
    points.retain(|point| {
        if seen.iter().any(|t| same_tonnage(*t, point.tonnage_t)) {
            false
        } else {
            seen.push(point.tonnage_t);
            true
        }
    });
}

fn same_tonnage(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.001
}

fn same_draft(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.001
}
