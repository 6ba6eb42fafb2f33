use crate::core::ConfigProvider;
use crate::utils::error::{NormalizerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// TOML-backed run profile, for repeatable batch runs against one broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerProfile {
    pub profile: ProfileInfo,
    pub source: SourceConfig,
    pub input: Option<InputConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub payload_files: Vec<String>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl NormalizerProfile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| NormalizerError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values, leaving
    /// unknown placeholders untouched.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for NormalizerProfile {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn payload_files(&self) -> &[String] {
        self.input
            .as_ref()
            .map(|i| i.payload_files.as_slice())
            .unwrap_or(&[])
    }

    fn concurrent_requests(&self) -> usize {
        self.input
            .as_ref()
            .and_then(|i| i.concurrent_requests)
            .unwrap_or(5)
    }
}

impl Validate for NormalizerProfile {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("profile.name", &self.profile.name)?;
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        if let Some(input) = &self.input {
            validation::validate_file_extensions(
                "input.payload_files",
                &input.payload_files,
                &["json"],
            )?;
            if let Some(concurrent) = input.concurrent_requests {
                validation::validate_positive_number("input.concurrent_requests", concurrent, 1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_a_basic_profile() {
        let toml_content = r#"
[profile]
name = "rhine-broker"
description = "Nightly pull"

[source]
endpoint = "https://api.example.com/listings"

[input]
payload_files = ["dump.json"]
concurrent_requests = 2

[load]
output_path = "./out"
"#;
        let profile = NormalizerProfile::from_toml_str(toml_content).unwrap();
        assert_eq!(profile.profile.name, "rhine-broker");
        assert_eq!(profile.api_endpoint(), "https://api.example.com/listings");
        assert_eq!(profile.payload_files(), ["dump.json".to_string()]);
        assert_eq!(profile.concurrent_requests(), 2);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("TEST_LISTINGS_ENDPOINT", "https://test.api.com");

        let toml_content = r#"
[profile]
name = "env-test"

[source]
endpoint = "${TEST_LISTINGS_ENDPOINT}"

[load]
output_path = "./out"
"#;
        let profile = NormalizerProfile::from_toml_str(toml_content).unwrap();
        assert_eq!(profile.source.endpoint, "https://test.api.com");

        std::env::remove_var("TEST_LISTINGS_ENDPOINT");
    }

    #[test]
    fn invalid_endpoint_fails_validation() {
        let toml_content = r#"
[profile]
name = "bad"

[source]
endpoint = "not-a-url"

[load]
output_path = "./out"
"#;
        let profile = NormalizerProfile::from_toml_str(toml_content).unwrap();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn loads_from_a_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[profile]
name = "file-test"

[source]
endpoint = "https://api.example.com"

[load]
output_path = "./out"
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let profile = NormalizerProfile::from_file(temp_file.path()).unwrap();
        assert_eq!(profile.profile.name, "file-test");
    }
}
