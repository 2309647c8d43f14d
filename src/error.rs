//! Error types for mindmend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MindMendError {
    #[error("{field} must not be empty")]
    EmptyInput { field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MindMendError {
    pub fn is_empty_input(&self) -> bool {
        matches!(self, MindMendError::EmptyInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, MindMendError>;

/// Rejects input that is empty after trimming whitespace.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(MindMendError::EmptyInput { field })
    } else {
        Ok(())
    }
}
