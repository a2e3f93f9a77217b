//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] vexil_parser::ParseError),

    /// Matching failed for a reason other than missing local data
    #[error("Match error: {0}")]
    MatchError(#[from] vexil_runtime::MatchError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid flag definition file
    #[error("Invalid flag file: {0}")]
    InvalidFlagFile(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
