//! Flag definition AST
//!
//! This module contains the node definitions for:
//! - Flag definitions and their filters
//! - Condition groups and property conditions
//! - Multivariate variants
//! - Match results

pub mod flag;
pub mod operator;
pub mod result;

pub use flag::{
    ConditionGroup, FlagDefinition, FlagFilters, MultivariateSpec, PropertyCondition, Variant,
};
pub use operator::PropertyOperator;
pub use result::{FlagValue, MatchResult};
