//! Comparison operator execution

use crate::error::{MatchError, Result};
use std::cmp::Ordering;
use vexil_core::PropertyOperator;

/// Compare two strings by byte order with an ordering operator
pub(crate) fn compare_strings(lhs: &str, rhs: &str, op: PropertyOperator) -> Result<bool> {
    apply_ordering(lhs.as_bytes().cmp(rhs.as_bytes()), op)
}

/// Compare two numbers with an ordering operator
///
/// NaN on either side has no ordering and cannot be decided.
pub(crate) fn compare_numbers(lhs: f64, rhs: f64, op: PropertyOperator) -> Result<bool> {
    match lhs.partial_cmp(&rhs) {
        Some(ordering) => apply_ordering(ordering, op),
        None => Err(MatchError::inconclusive(format!(
            "Cannot order {} and {}",
            lhs, rhs
        ))),
    }
}

fn apply_ordering(ordering: Ordering, op: PropertyOperator) -> Result<bool> {
    match op {
        PropertyOperator::Gt => Ok(ordering == Ordering::Greater),
        PropertyOperator::Gte => Ok(ordering != Ordering::Less),
        PropertyOperator::Lt => Ok(ordering == Ordering::Less),
        PropertyOperator::Lte => Ok(ordering != Ordering::Greater),
        other => Err(MatchError::InvalidOperator(format!(
            "{} is not an ordering operator",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_ordering_is_bytewise() {
        assert!(!compare_strings("10abc", "5", PropertyOperator::Gt).unwrap());
        assert!(compare_strings("10", "5", PropertyOperator::Lt).unwrap());
        assert!(compare_strings("b", "B", PropertyOperator::Gt).unwrap());
        assert!(compare_strings("abc", "abc", PropertyOperator::Gte).unwrap());
        assert!(compare_strings("abc", "abc", PropertyOperator::Lte).unwrap());
        assert!(!compare_strings("abc", "abc", PropertyOperator::Lt).unwrap());
    }

    #[test]
    fn test_number_ordering() {
        assert!(compare_numbers(10.0, 5.0, PropertyOperator::Gt).unwrap());
        assert!(compare_numbers(5.0, 5.0, PropertyOperator::Gte).unwrap());
        assert!(!compare_numbers(5.0, 5.0, PropertyOperator::Lt).unwrap());
        assert!(compare_numbers(-1.5, 0.0, PropertyOperator::Lte).unwrap());
    }

    #[test]
    fn test_nan_is_inconclusive() {
        let err = compare_numbers(f64::NAN, 1.0, PropertyOperator::Gt).unwrap_err();
        assert!(err.is_inconclusive());
    }

    #[test]
    fn test_non_ordering_operator_is_invalid() {
        let err = compare_strings("a", "b", PropertyOperator::Exact).unwrap_err();
        assert!(matches!(err, MatchError::InvalidOperator(_)));
        assert!(!err.is_inconclusive());
    }
}
