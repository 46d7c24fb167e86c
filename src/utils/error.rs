use thiserror::Error;

#[derive(Error, Debug)]
pub enum KvDriveError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Connecting to {kind} '{name}' failed: {message}")]
    ConnectionError {
        kind: &'static str,
        name: String,
        message: String,
    },

    #[error("{operation} failed: {message}")]
    OperationError {
        operation: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, KvDriveError>;
