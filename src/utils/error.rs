use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to load {artifact}: {message}")]
    AssetLoadError { artifact: String, message: String },

    #[error("Model not loaded: {message}")]
    ModelUnavailable { message: String },

    #[error("Expected {expected} features, got {actual}")]
    InputShapeError { expected: usize, actual: usize },

    #[error("Invalid value for feature '{feature}': {reason}")]
    InvalidFeatureValue { feature: String, reason: String },

    #[error("{message}")]
    TransformError { message: String },

    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Load,
    Input,
    Network,
    Internal,
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::ConfigError { .. }
            | ServiceError::ConfigValidationError { .. }
            | ServiceError::InvalidConfigValueError { .. }
            | ServiceError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ServiceError::AssetLoadError { .. } | ServiceError::ModelUnavailable { .. } => {
                ErrorCategory::Load
            }
            ServiceError::InputShapeError { .. }
            | ServiceError::InvalidFeatureValue { .. }
            | ServiceError::TransformError { .. } => ErrorCategory::Input,
            ServiceError::ApiError(_) | ServiceError::UnexpectedResponse { .. } => {
                ErrorCategory::Network
            }
            ServiceError::IoError(_) | ServiceError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn transform(message: impl Into<String>) -> Self {
        ServiceError::TransformError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
