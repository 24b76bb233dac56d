use thiserror::Error;

#[derive(Error, Debug)]
pub enum IstError {
    #[error("Unparsable timestamp '{value}': {reason}")]
    UnparsableTimestamp { value: String, reason: String },

    #[error("Unparsable timestamp in field '{field}': '{value}'")]
    UnparsableField { field: String, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Io,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl IstError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IstError::UnparsableTimestamp { .. } | IstError::UnparsableField { .. } => {
                ErrorCategory::Input
            }
            IstError::IoError(_) => ErrorCategory::Io,
            IstError::ConfigValidationError { .. }
            | IstError::MissingConfigError { .. }
            | IstError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            IstError::SerializationError(_)
            | IstError::CsvError(_)
            | IstError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Processing | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IstError::UnparsableTimestamp { .. } | IstError::UnparsableField { .. } => {
                "Use an ISO-8601 timestamp such as 2024-03-10T10:00:00Z, or drop --strict to pass it through"
            }
            IstError::IoError(_) => "Check that the file exists and that you have permission to read/write it",
            IstError::SerializationError(_) => "Make sure the input is a JSON array of objects or a single object",
            IstError::CsvError(_) => "Make sure the CSV input has a header row and consistent columns",
            IstError::ConfigValidationError { .. }
            | IstError::MissingConfigError { .. }
            | IstError::InvalidConfigValueError { .. } => {
                "Review the job configuration file and fix the reported field"
            }
            IstError::ProcessingError { .. } => "Inspect the input records for unexpected shapes",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IstError::UnparsableTimestamp { value, .. } => {
                format!("Could not read '{}' as a timestamp", value)
            }
            IstError::UnparsableField { field, value } => {
                format!("Field '{}' holds '{}', which is not a timestamp", field, value)
            }
            IstError::MissingConfigError { field } => {
                format!("The configuration is missing '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IstError>;
