//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Definition parsed but violates a structural constraint
    #[error("Invalid flag definition: {0}")]
    InvalidDefinition(#[from] vexil_core::CoreError),

    /// Two definitions share a key
    #[error("Duplicate flag key: {0}")]
    DuplicateFlag(String),

    /// Document has none of the accepted top-level shapes
    #[error("Unsupported document shape: {0}")]
    UnsupportedShape(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
