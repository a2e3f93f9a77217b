//! Vexil Runtime - Local evaluation engine for Vexil feature flags
//!
//! Decides from a flag definition, a distinct id and the subject's property
//! values whether a flag is on and which variant applies, or reports that
//! the decision cannot be made locally.
//!
//! Evaluation is synchronous and stateless. The only input besides the
//! arguments is the wall clock, sampled when a relative date is resolved.

pub mod date;
pub mod error;
pub mod hash;
pub mod matcher;
pub mod operators;
pub mod property;
pub mod variant;

// Re-export main types
pub use date::{parse_absolute_date, parse_relative_date, parse_relative_date_at};
pub use error::{MatchError, Result};
pub use hash::{hash, LONG_SCALE, ROLLOUT_SALT, VARIANT_SALT};
pub use matcher::{match_feature_flag_properties, sorted_condition_groups};
pub use property::match_property;
pub use variant::{select_variant, variant_lookup_table, VariantRange};
pub use vexil_core::{FlagDefinition, FlagValue, MatchResult, PropertyValues, Value};
