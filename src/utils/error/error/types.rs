//! Error types for the orchestrator

use crate::core::router::RouterError;
use thiserror::Error;

/// Result type alias for the orchestrator
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the orchestrator
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Routing errors surfaced to the caller
    #[error(transparent)]
    Router(#[from] RouterError),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
