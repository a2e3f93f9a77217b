//! Vexil SDK
//!
//! High-level API for evaluating a set of feature flags locally, deciding
//! per flag whether the answer is known or must come from remote evaluation.

pub mod builder;
pub mod config;
pub mod error;
pub mod evaluator;

// Re-export main types
pub use builder::FlagEvaluatorBuilder;
pub use config::EvaluatorConfig;
pub use error::{Result, SdkError};
pub use evaluator::{
    AllFlags, EvaluationRequest, FlagEvaluator, LocalDecision, CURRENT_DISTINCT_ID_PROPERTY,
    GROUP_KEY_PROPERTY,
};

// Re-export commonly used types from dependencies
pub use vexil_core::{FlagDefinition, FlagValue, MatchResult, PropertyValues, Value};
pub use vexil_parser::FlagSet;
pub use vexil_runtime::MatchError;
