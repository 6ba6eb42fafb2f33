//! Domain extractors and the rich-data gate.
//!
//! Each extractor is an independent, pure function from a raw payload to an
//! optional domain structure; `VesselDetails::extract` bundles all of them.

pub mod engines;
pub mod sections;
pub mod tonnage;

pub use engines::extract_engines;
pub use sections::{
    extract_accommodation, extract_certificates, extract_deck, extract_holds, extract_hull,
    extract_navigation, extract_propeller, extract_tanks, extract_wheelhouse,
};
pub use tonnage::extract_tonnage_curve;

use crate::core::grouping;
use crate::domain::model::{
    Accommodation, CargoHolds, Certificates, DeckEquipment, EngineEntry, Hull,
    NavigationEquipment, Propeller, RawPayload, Tanks, TonnagePoint, Wheelhouse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every typed result the engine can produce for one vessel. A `None` field
/// means "not reported" and the section should be omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselDetails {
    pub engines: Option<Vec<EngineEntry>>,
    pub tonnage_curve: Option<Vec<TonnagePoint>>,
    pub navigation: Option<NavigationEquipment>,
    pub certificates: Option<Certificates>,
    pub accommodation: Option<Accommodation>,
    pub holds: Option<CargoHolds>,
    pub hull: Option<Hull>,
    pub propeller: Option<Propeller>,
    pub tanks: Option<Tanks>,
    pub deck: Option<DeckEquipment>,
    pub wheelhouse: Option<Wheelhouse>,
}

impl VesselDetails {
    pub fn extract(payload: &RawPayload) -> Self {
        Self {
            engines: extract_engines(payload),
            tonnage_curve: extract_tonnage_curve(payload),
            navigation: extract_navigation(payload),
            certificates: extract_certificates(payload),
            accommodation: extract_accommodation(payload),
            holds: extract_holds(payload),
            hull: extract_hull(payload),
            propeller: extract_propeller(payload),
            tanks: extract_tanks(payload),
            deck: extract_deck(payload),
            wheelhouse: extract_wheelhouse(payload),
        }
    }

    /// True when every extractor came back absent. Checked structurally over
    /// the serialized bundle so adding an extractor field needs no change
    /// here (or in the gate).
    pub fn is_empty(&self) -> bool {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields.values().all(Value::is_null),
            _ => true,
        }
    }
}

/// The minimum bar for showing a details panel: the payload has substance
/// beyond internal bookkeeping keys, and at least one domain extractor
/// recognized something.
pub fn has_rich_data(payload: &RawPayload) -> bool {
    let has_visible_keys = payload.keys().any(|key| !grouping::is_internal_key(key));
    has_visible_keys && !VesselDetails::extract(payload).is_empty()
}
