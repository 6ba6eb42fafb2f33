pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::profile::NormalizerProfile;
pub use core::engine::NormalizerEngine;
pub use core::pipeline::ListingPipeline;
pub use utils::error::{NormalizerError, Result};
