//! Error handling for the monitor
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Main error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A probe with this name is already registered
    #[error("Duplicate probe name: {0}")]
    DuplicateProbe(String),

    /// A poll cycle is already in flight
    #[error("A poll cycle is already running")]
    Busy,

    /// Network/HTTP failure while contacting a dependency
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response arrived but expected fields were absent
    #[error("Malformed response: {0}")]
    Malformed(String),

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
}
