//! Error types for loading descriptions and configuration files.

use command_binder_core::BindError;
use thiserror::Error;

/// Errors that can occur while loading a description or building its tree.
#[derive(Debug, Error)]
pub enum DescError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but does not describe a usable field list.
    #[error("invalid description: {0}")]
    InvalidDescription(String),

    /// Scanning the described fields into a command tree failed.
    #[error("bind error: {0}")]
    Bind(#[from] BindError),
}

/// Convenience alias for results with [`DescError`].
pub type Result<T> = std::result::Result<T, DescError>;
