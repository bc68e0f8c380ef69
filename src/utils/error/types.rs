//! Error types for the access-control core

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AccessError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AccessError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// The backend answered a remote call with an error
    #[error("Remote call {endpoint} failed: {message}")]
    Remote { endpoint: String, message: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}
