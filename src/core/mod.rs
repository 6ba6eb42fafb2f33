pub mod coerce;
pub mod engine;
pub mod extract;
pub mod grouping;
pub mod matcher;
pub mod pipeline;

pub use crate::domain::model::{NormalizedBatch, NormalizedListing, RawPayload, VesselRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use extract::{has_rich_data, VesselDetails};
pub use grouping::group_generic_details;
