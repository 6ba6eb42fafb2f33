//! The smaller domain extractors: navigation, certificates, accommodation,
//! cargo holds, hull, propeller/steering, tanks, deck equipment, wheelhouse.
//!
//! Each follows the same contract: ranked pattern lookups per field, and
//! `None` for the whole domain when every field comes back absent, so the
//! caller can omit the section entirely.

use crate::core::{coerce, matcher};
use crate::domain::model::{
    Accommodation, CargoHolds, Certificates, DeckEquipment, Hull, NavigationEquipment, Propeller,
    RawPayload, Tanks, Wheelhouse,
};
use serde_json::Value;

pub fn extract_navigation(payload: &RawPayload) -> Option<NavigationEquipment> {
    let nav = NavigationEquipment {
        radar: mentions(payload, &["radar"]),
        gps: mentions(payload, &["gps", "dgps"]),
        ais: mentions(payload, &["ais"]),
        vhf: mentions(payload, &["marifoon", "vhf"]),
        cameras: mentions(payload, &["camera"]),
        autopilot: mentions(payload, &["autopilot", "stuurautomaat"]),
        depth_sounder: mentions(payload, &["dieptemeter", "echolood", "depth sounder"]),
        extras: navigation_extras(payload),
    };
    (!nav.is_empty()).then_some(nav)
}

/// Broad scan across key names and string values. Some sources only mention
/// equipment inside free-text remarks, so false positives are accepted in
/// exchange for not missing those.
fn mentions(payload: &RawPayload, words: &[&str]) -> bool {
    payload.iter().any(|(key, value)| {
        let key = key.to_lowercase();
        if words.iter().any(|w| key.contains(w)) && matcher::is_present(value) {
            return true;
        }
        match value {
            Value::String(s) => {
                let s = s.to_lowercase();
                words.iter().any(|w| s.contains(w))
            }
            _ => false,
        }
    })
}

fn navigation_extras(payload: &RawPayload) -> Vec<String> {
    let mut extras = Vec::new();
    for word in ["navigatie", "navigation"] {
        for (_, value) in matcher::find_all(payload, word) {
            if let Some(text) = coerce::text(value) {
                if !extras.contains(&text) {
                    extras.push(text);
                }
            }
        }
    }
    extras
}

pub fn extract_certificates(payload: &RawPayload) -> Option<Certificates> {
    let certs = Certificates {
        attestation: matcher::first_text(payload, &["attest"]),
        classification: matcher::first_text(payload, &["classificatie", "klasse", "classification"]),
        push_certificate: matcher::first_text(
            payload,
            &["duwcertificaat", "koppelverband", "push certificate"],
        ),
        adn: matcher::first_text(payload, &["adnr", "adn"]),
        green_award: matcher::first_text(payload, &["green award", "green_award"]),
        zone: matcher::first_text(payload, &["zone"]),
        other: other_certificates(payload),
    };
    (!certs.is_empty()).then_some(certs)
}

/// Certificate keys not covered by one of the named slots.
fn other_certificates(payload: &RawPayload) -> Vec<String> {
    const CLAIMED: &[&str] = &[
        "attest",
        "classificatie",
        "klasse",
        "duwcertificaat",
        "koppelverband",
        "adn",
        "green award",
        "zone",
    ];
    // "certifica" covers both the English and the Dutch ("certificaat")
    // spelling of the key family.
    matcher::find_all(payload, "certifica")
        .into_iter()
        .filter(|(key, _)| {
            let key = key.to_lowercase();
            !CLAIMED.iter().any(|claimed| key.contains(claimed))
        })
        .filter_map(|(_, value)| coerce::text(value))
        .collect()
}

pub fn extract_accommodation(payload: &RawPayload) -> Option<Accommodation> {
    let accommodation = Accommodation {
        description: matcher::first_text(
            payload,
            &["accommodatie > omschrijving", "accommodatie", "accommodation", "woning"],
        ),
        cabins: matcher::first_numeric(payload, &["aantal hutten", "hutten", "cabins"]),
        beds: matcher::first_numeric(payload, &["slaapplaatsen", "bedden", "beds"]),
        heating: matcher::first_text(payload, &["verwarming", "heating"]),
        sanitary: matcher::first_text(payload, &["sanitair", "sanitary", "toilet"]),
    };
    (!accommodation.is_empty()).then_some(accommodation)
}

pub fn extract_holds(payload: &RawPayload) -> Option<CargoHolds> {
    let holds = CargoHolds {
        count: matcher::first_numeric(payload, &["aantal ruimen", "ruimen", "holds"]),
        capacity_m3: matcher::first_numeric(
            payload,
            &["ruim inhoud", "inhoud m3", "hold capacity", "kubieke"],
        ),
        dimensions: matcher::first_text(
            payload,
            &["ruim afmeting", "afmeting ruim", "hold dimensions", "laadruim"],
        ),
        floor: matcher::first_text(payload, &["buikdenning", "ruim vloer", "hold floor"]),
        hatches: matcher::first_text(payload, &["luiken", "hatch"]),
    };
    (!holds.is_empty()).then_some(holds)
}

pub fn extract_hull(payload: &RawPayload) -> Option<Hull> {
    let hull = Hull {
        yard: matcher::first_text(payload, &["werf", "shipyard", "yard"]),
        build_year: matcher::first_year(
            payload,
            &["bouwjaar casco", "bouwjaar schip", "year built", "bouwjaar"],
        ),
        material: matcher::first_text(payload, &["materiaal", "material"]),
        hull_type: matcher::first_text(payload, &["rompvorm", "hull type", "casco type"]),
        coating: matcher::first_text(payload, &["conservering", "coating"]),
    };
    (!hull.is_empty()).then_some(hull)
}

pub fn extract_propeller(payload: &RawPayload) -> Option<Propeller> {
    let propeller = Propeller {
        propeller: matcher::first_text(payload, &["schroef type", "schroef", "propeller"]),
        propeller_count: matcher::first_numeric(payload, &["aantal schroeven", "propeller count"]),
        steering: matcher::first_text(payload, &["stuurwerk", "besturing", "steering"]),
        rudders: matcher::first_text(payload, &["roeren", "roer", "rudder"]),
    };
    (!propeller.is_empty()).then_some(propeller)
}

pub fn extract_tanks(payload: &RawPayload) -> Option<Tanks> {
    let tanks = Tanks {
        fuel_capacity_l: matcher::first_numeric(
            payload,
            &["brandstoftank", "bunkercapaciteit", "fuel tank"],
        ),
        drinking_water_l: matcher::first_numeric(
            payload,
            &["drinkwatertank", "drinkwater", "drinking water"],
        ),
        ballast: matcher::first_text(payload, &["ballasttank", "ballast"]),
        septic: matcher::first_text(payload, &["vuilwatertank", "vuilwater", "septic"]),
    };
    (!tanks.is_empty()).then_some(tanks)
}

pub fn extract_deck(payload: &RawPayload) -> Option<DeckEquipment> {
    let deck = DeckEquipment {
        anchors: matcher::first_text(payload, &["ankers", "anker", "anchor"]),
        winches: matcher::first_text(payload, &["lieren", "lier", "winch"]),
        crane: matcher::first_text(payload, &["kraan", "crane"]),
        hydraulics: matcher::first_text(payload, &["hydrauliek", "hydraulic"]),
        mast: matcher::first_text(payload, &["mast"]),
    };
    (!deck.is_empty()).then_some(deck)
}

pub fn extract_wheelhouse(payload: &RawPayload) -> Option<Wheelhouse> {
    let wheelhouse = Wheelhouse {
        kind: matcher::first_text(payload, &["stuurhut type", "stuurhut", "stuurhuis", "wheelhouse"]),
        lift: matcher::first_text(payload, &["hefbaar", "hefkolom", "in hoogte verstelbaar"]),
        heating: matcher::first_text(payload, &["stuurhut verwarming", "wheelhouse heating"]),
        remarks: matcher::first_text(payload, &["stuurhut bijzonderheden", "wheelhouse remarks"]),
    };
    (!wheelhouse.is_empty()).then_some(wheelhouse)
}
