#[cfg(feature = "cli")]
pub mod cli;
pub mod profile;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "vessel-normalizer")]
#[command(about = "Normalizes broker vessel listings into typed details")]
pub struct CliConfig {
    /// Broker listings endpoint, used when no payload files are given
    #[arg(long, default_value = "https://example.com/api/listings")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Local JSON payload files, comma separated
    #[arg(long, value_delimiter = ',')]
    pub payload_files: Vec<String>,

    #[arg(long, default_value = "5")]
    pub concurrent_requests: usize,

    /// TOML run profile; when given its settings replace the flags above
    #[arg(long)]
    pub profile: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU/memory stats per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn payload_files(&self) -> &[String] {
        &self.payload_files
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validation::validate_file_extensions("payload_files", &self.payload_files, &["json"])?;
        if let Some(profile) = &self.profile {
            validation::validate_file_extensions(
                "profile",
                std::slice::from_ref(profile),
                &["toml"],
            )?;
        }
        Ok(())
    }
}
