//! Error types for AvdForge
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for AvdForge
#[derive(Error, Debug)]
pub enum AvdForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for AvdForge operations
pub type Result<T> = std::result::Result<T, AvdForgeError>;
