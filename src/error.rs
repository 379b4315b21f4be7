//! Domain-specific error types for storectl

use thiserror::Error;

/// Main error type for the storectl reporting core
#[derive(Error, Debug)]
pub enum StoreCtlError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported shape: {message}")]
    UnsupportedShape { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreCtlError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        StoreCtlError::UnsupportedShape {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for StoreCtlError {
    fn from(err: anyhow::Error) -> Self {
        StoreCtlError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreCtlError {
    fn from(err: serde_json::Error) -> Self {
        StoreCtlError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StoreCtlError {
    fn from(err: serde_yaml::Error) -> Self {
        StoreCtlError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StoreCtlError {
    fn from(err: toml::de::Error) -> Self {
        StoreCtlError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

impl From<std::io::Error> for StoreCtlError {
    fn from(err: std::io::Error) -> Self {
        StoreCtlError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for storectl operations
pub type Result<T> = std::result::Result<T, StoreCtlError>;
