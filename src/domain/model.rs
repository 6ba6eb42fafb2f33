use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One broker payload: arbitrarily nested, schema-less JSON attributes.
/// Key names, nesting depth and value formats differ per source.
pub type RawPayload = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselRecord {
    pub id: Option<String>,
    pub payload: RawPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnginePosition {
    Main,
    Generator,
    Thruster,
    Gearbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEntry {
    pub name: Option<String>,
    pub horsepower: Option<f64>,
    pub kilowatts: Option<f64>,
    pub build_year: Option<u16>,
    pub operating_hours: Option<u64>,
    pub revision: Option<String>,
    pub position: EnginePosition,
}

impl EngineEntry {
    pub fn empty(position: EnginePosition) -> Self {
        Self {
            name: None,
            horsepower: None,
            kilowatts: None,
            build_year: None,
            operating_hours: None,
            revision: None,
            position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.horsepower.is_none()
            && self.kilowatts.is_none()
            && self.build_year.is_none()
            && self.operating_hours.is_none()
            && self.revision.is_none()
    }
}

/// One point on the tonnage-by-draft curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TonnagePoint {
    pub draft_m: f64,
    pub tonnage_t: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationEquipment {
    pub radar: bool,
    pub gps: bool,
    pub ais: bool,
    pub vhf: bool,
    pub cameras: bool,
    pub autopilot: bool,
    pub depth_sounder: bool,
    pub extras: Vec<String>,
}

impl NavigationEquipment {
    pub fn is_empty(&self) -> bool {
        !self.radar
            && !self.gps
            && !self.ais
            && !self.vhf
            && !self.cameras
            && !self.autopilot
            && !self.depth_sounder
            && self.extras.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certificates {
    pub attestation: Option<String>,
    pub classification: Option<String>,
    pub push_certificate: Option<String>,
    pub adn: Option<String>,
    pub green_award: Option<String>,
    pub zone: Option<String>,
    pub other: Vec<String>,
}

impl Certificates {
    pub fn is_empty(&self) -> bool {
        self.attestation.is_none()
            && self.classification.is_none()
            && self.push_certificate.is_none()
            && self.adn.is_none()
            && self.green_award.is_none()
            && self.zone.is_none()
            && self.other.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub description: Option<String>,
    pub cabins: Option<f64>,
    pub beds: Option<f64>,
    pub heating: Option<String>,
    pub sanitary: Option<String>,
}

impl Accommodation {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.cabins.is_none()
            && self.beds.is_none()
            && self.heating.is_none()
            && self.sanitary.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CargoHolds {
    pub count: Option<f64>,
    pub capacity_m3: Option<f64>,
    pub dimensions: Option<String>,
    pub floor: Option<String>,
    pub hatches: Option<String>,
}

impl CargoHolds {
    pub fn is_empty(&self) -> bool {
        self.count.is_none()
            && self.capacity_m3.is_none()
            && self.dimensions.is_none()
            && self.floor.is_none()
            && self.hatches.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hull {
    pub yard: Option<String>,
    pub build_year: Option<u16>,
    pub material: Option<String>,
    pub hull_type: Option<String>,
    pub coating: Option<String>,
}

impl Hull {
    pub fn is_empty(&self) -> bool {
        self.yard.is_none()
            && self.build_year.is_none()
            && self.material.is_none()
            && self.hull_type.is_none()
            && self.coating.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Propeller {
    pub propeller: Option<String>,
    pub propeller_count: Option<f64>,
    pub steering: Option<String>,
    pub rudders: Option<String>,
}

impl Propeller {
    pub fn is_empty(&self) -> bool {
        self.propeller.is_none()
            && self.propeller_count.is_none()
            && self.steering.is_none()
            && self.rudders.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tanks {
    pub fuel_capacity_l: Option<f64>,
    pub drinking_water_l: Option<f64>,
    pub ballast: Option<String>,
    pub septic: Option<String>,
}

impl Tanks {
    pub fn is_empty(&self) -> bool {
        self.fuel_capacity_l.is_none()
            && self.drinking_water_l.is_none()
            && self.ballast.is_none()
            && self.septic.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckEquipment {
    pub anchors: Option<String>,
    pub winches: Option<String>,
    pub crane: Option<String>,
    pub hydraulics: Option<String>,
    pub mast: Option<String>,
}

impl DeckEquipment {
    pub fn is_empty(&self) -> bool {
        self.anchors.is_none()
            && self.winches.is_none()
            && self.crane.is_none()
            && self.hydraulics.is_none()
            && self.mast.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wheelhouse {
    pub kind: Option<String>,
    pub lift: Option<String>,
    pub heating: Option<String>,
    pub remarks: Option<String>,
}

impl Wheelhouse {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.lift.is_none()
            && self.heating.is_none()
            && self.remarks.is_none()
    }
}

/// One label/value row of the generic "show all details" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSection {
    pub section: String,
    pub items: Vec<DetailItem>,
}

/// Normalization output for one vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedListing {
    pub id: Option<String>,
    pub details: crate::core::extract::VesselDetails,
    pub generic: Vec<DetailSection>,
}

/// Transform-phase output for a batch of records.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    pub listings: Vec<NormalizedListing>,
    pub summary_csv: String,
    pub skipped: Vec<VesselRecord>,
}
