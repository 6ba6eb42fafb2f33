use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Processing error: {message}")]
    Processing { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NormalizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => ErrorCategory::Configuration,
            Self::Api(_) => ErrorCategory::Network,
            Self::Io(_) | Self::Zip(_) => ErrorCategory::Storage,
            Self::Csv(_) | Self::Serialization(_) | Self::Processing { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Api(_) => ErrorSeverity::Medium,
            Self::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Api(_) => {
                "Check the broker endpoint URL and network connectivity, then retry".to_string()
            }
            Self::ConfigValidation { field, .. }
            | Self::InvalidConfigValue { field, .. }
            | Self::MissingConfig { field } => {
                format!("Review the '{}' setting in your configuration", field)
            }
            Self::Io(_) => "Check file paths and filesystem permissions".to_string(),
            Self::Zip(_) => "Check free disk space for the output archive".to_string(),
            Self::Csv(_) | Self::Serialization(_) => {
                "The output writer hit malformed data; rerun with --verbose for details".to_string()
            }
            Self::Processing { .. } => "Rerun with --verbose and inspect the logs".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the broker API: {}", self),
            ErrorCategory::Storage => format!("Storage problem: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
