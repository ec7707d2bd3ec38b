//! Error types for the ConnectLife client

use thiserror::Error;

/// Main error type for the ConnectLife client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No credentials available, authenticate first")]
    NoCredentials,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Token expired, re-authentication required: {0}")]
    TokenExpired(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Unsupported device type: {device_type}-{feature_code}")]
    UnsupportedDeviceType {
        device_type: String,
        feature_code: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ClientError {
    /// Build an [`ClientError::ApiError`] from a vendor message
    pub fn api(message: impl Into<String>) -> Self {
        ClientError::ApiError {
            message: message.into(),
        }
    }

    /// Whether the caller has to run the authentication flow again
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            ClientError::NoCredentials
                | ClientError::TokenExpired(_)
                | ClientError::AuthenticationFailed(_)
        )
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::ConfigError(format!("invalid URL: {}", err))
    }
}
