//! Error types for attribute matching

use thiserror::Error;

use crate::core::storage::StoreError;

/// Crate result type
pub type Result<T> = std::result::Result<T, AbacError>;

/// Errors raised while configuring matchers or compiling policy patterns
#[derive(Error, Debug)]
pub enum AbacError {
    /// Invalid configuration value (e.g. a non-string `equals`)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tagged pattern could not be turned into a regular expression
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Policy store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML configuration could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl AbacError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        AbacError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
