//! Error types for loading entities, values and configuration
//!
//! The dispatch operations themselves are total and never fail; errors only
//! arise at the edges where input is read or settings are loaded.

use thiserror::Error;

/// Result type for fallible edge operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Errors raised while reading input or configuration
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
