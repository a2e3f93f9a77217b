//! Operator execution modules
//!
//! Evaluation routines shared by the property matcher: ordering
//! comparisons and regular expression matching.

mod comparison;
mod pattern;

pub(crate) use comparison::{compare_numbers, compare_strings};
pub(crate) use pattern::compile_pattern;
