use crate::config::error::ConfigError;
use crate::relay::DeliveryError;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Handler-facing variants map onto HTTP status codes in
/// `api::middleware::error_handler`; the remaining variants surface at startup
/// or from the CLI.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Inbound payload lacks the expected `detailedMessage.markdown` shape
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    /// Outbound delivery failed and the caller asked to be told about it
    #[error("Delivery to chat webhook failed")]
    Delivery {
        #[source]
        source: DeliveryError,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. }
            | ConfigError::MissingRequired { field, .. } => field.clone(),
            _ => "config".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

impl From<DeliveryError> for AppError {
    fn from(error: DeliveryError) -> Self {
        AppError::Delivery { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
