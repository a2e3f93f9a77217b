//! Vexil Core - Core types and definitions for the Vexil feature flag engine
//!
//! This crate provides the fundamental types used across the Vexil crates:
//! - Value types for supplied property values
//! - Flag definition AST (condition groups, property conditions, variants)
//! - Property operators
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{
    ConditionGroup, FlagDefinition, FlagFilters, FlagValue, MatchResult, MultivariateSpec,
    PropertyCondition, PropertyOperator, Variant,
};
pub use error::CoreError;
pub use types::{PropertyValues, Value};
