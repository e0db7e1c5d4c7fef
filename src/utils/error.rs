use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Catalog source returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CompareError {
    /// Errors that mean the catalog could not be obtained. The controller
    /// folds every one of these into its failed state.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CompareError::ApiError(_)
                | CompareError::HttpStatusError { .. }
                | CompareError::IoError(_)
                | CompareError::SerializationError(_)
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CompareError::ApiError(_) | CompareError::HttpStatusError { .. } => {
                ErrorSeverity::Medium
            }
            CompareError::SerializationError(_) | CompareError::CsvError(_) => ErrorSeverity::High,
            CompareError::InvalidArgument { .. } => ErrorSeverity::High,
            CompareError::ConfigError { .. }
            | CompareError::MissingConfigError { .. }
            | CompareError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CompareError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        if self.is_load_error() {
            return "Unable to load pricing data. Please reload.".to_string();
        }
        match self {
            CompareError::CsvError(e) => format!("Could not write CSV output: {}", e),
            CompareError::InvalidArgument { message } => format!("Invalid budget: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CompareError::ApiError(_) => {
                "Check that the catalog server is running and reachable, then reload"
            }
            CompareError::HttpStatusError { .. } => {
                "The catalog server answered with an error; check its logs and reload"
            }
            CompareError::SerializationError(_) => {
                "The catalog is not a valid plan array; fix the data file and reload"
            }
            CompareError::IoError(_) => "Check that the catalog file exists and is readable",
            CompareError::CsvError(_) => "Check that the output location is writable",
            CompareError::ConfigError { .. }
            | CompareError::MissingConfigError { .. }
            | CompareError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
            CompareError::InvalidArgument { .. } => "Use a whole, non-negative dollar amount",
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
