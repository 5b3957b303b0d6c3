//! Error types for the router

use crate::core::router::RouterError;
use thiserror::Error;

/// Result type alias for the router
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the router
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Routing errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}
