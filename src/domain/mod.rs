pub mod model;
pub mod ports;

pub use model::{RawPayload, VesselRecord};
