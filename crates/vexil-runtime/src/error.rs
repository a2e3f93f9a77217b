//! Runtime error types

use thiserror::Error;

/// Error raised while matching a flag locally
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Local data is insufficient to decide; the caller must defer to
    /// remote evaluation. Never equivalent to a `false` match.
    #[error("Inconclusive match: {0}")]
    Inconclusive(String),

    /// An operator reached an evaluation routine that does not handle it
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),
}

impl MatchError {
    /// Create an inconclusive error
    pub fn inconclusive(reason: impl Into<String>) -> Self {
        MatchError::Inconclusive(reason.into())
    }

    /// Returns true if this error means "cannot decide locally"
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, MatchError::Inconclusive(_))
    }
}

/// Result type for matching operations
pub type Result<T> = std::result::Result<T, MatchError>;
