//! Property condition matching
//!
//! Evaluates one [`PropertyCondition`] against the supplied property values.
//! Every operator kind is dispatched from a single `match`, so adding an
//! operator to the core enum forces a decision here.

use crate::date::{parse_absolute_date, parse_relative_date};
use crate::error::{MatchError, Result};
use crate::operators::{compare_numbers, compare_strings, compile_pattern};
use chrono::{DateTime, Utc};
use vexil_core::{PropertyCondition, PropertyOperator, PropertyValues, Value};

/// Match a single property condition.
///
/// Returns `Err(MatchError::Inconclusive)` when the supplied values cannot
/// settle the condition: the key is absent (except for `is_set`), the
/// operator is `is_not_set` or unknown, or a date cannot be parsed.
pub fn match_property(condition: &PropertyCondition, values: &PropertyValues) -> Result<bool> {
    let operator = condition.operator;

    if operator == PropertyOperator::IsNotSet {
        return Err(MatchError::inconclusive(
            "Can't match properties with operator is_not_set",
        ));
    }

    let supplied = match values.get(&condition.key) {
        Some(value) => value,
        None if operator == PropertyOperator::IsSet => return Ok(false),
        None => {
            return Err(MatchError::inconclusive(format!(
                "Can't match property '{}' without a given property value",
                condition.key
            )))
        }
    };

    let expected = &condition.value;

    let matched = match operator {
        PropertyOperator::Exact => exact_match(expected, supplied),
        PropertyOperator::IsNot => !exact_match(expected, supplied),
        PropertyOperator::IsSet => true,
        PropertyOperator::Icontains => icontains(expected, supplied),
        PropertyOperator::NotIcontains => !icontains(expected, supplied),
        PropertyOperator::Regex | PropertyOperator::NotRegex => {
            match compile_pattern(&expected.to_match_string()) {
                // Malformed patterns settle as a non-match for both operators
                None => false,
                Some(regex) => {
                    regex.is_match(&supplied.to_match_string())
                        == (operator == PropertyOperator::Regex)
                }
            }
        }
        PropertyOperator::Gt
        | PropertyOperator::Gte
        | PropertyOperator::Lt
        | PropertyOperator::Lte => compare_ordered(expected, supplied, operator)?,
        PropertyOperator::IsDateBefore
        | PropertyOperator::IsDateAfter
        | PropertyOperator::IsRelativeDateBefore
        | PropertyOperator::IsRelativeDateAfter => compare_dates(expected, supplied, operator)?,
        PropertyOperator::IsNotSet | PropertyOperator::Unknown => {
            return Err(MatchError::inconclusive(format!(
                "Unsupported operator for property '{}'",
                condition.key
            )))
        }
    };

    tracing::debug!(
        "Property {} {} {:?} against {:?}: {}",
        condition.key,
        operator,
        expected,
        supplied,
        matched
    );

    Ok(matched)
}

fn exact_match(expected: &Value, supplied: &Value) -> bool {
    let supplied = supplied.to_match_string().to_lowercase();
    match expected {
        Value::Array(items) => items
            .iter()
            .any(|item| item.to_match_string().to_lowercase() == supplied),
        other => other.to_match_string().to_lowercase() == supplied,
    }
}

fn icontains(expected: &Value, supplied: &Value) -> bool {
    supplied
        .to_match_string()
        .to_lowercase()
        .contains(&expected.to_match_string().to_lowercase())
}

/// Ordering comparison with the mixed numeric/string rules.
///
/// A numeric condition value is compared numerically only when the supplied
/// value is not a string; string inputs are compared as strings even if
/// they look numeric, so `"10" < "5"`.
fn compare_ordered(expected: &Value, supplied: &Value, op: PropertyOperator) -> Result<bool> {
    match (expected.as_number(), supplied) {
        (Some(_), Value::String(s)) => compare_strings(s, &expected.to_match_string(), op),
        (Some(threshold), Value::Number(n)) => compare_numbers(*n, threshold, op),
        (Some(_), Value::Null) | (None, _) => compare_strings(
            &supplied.to_match_string(),
            &expected.to_match_string(),
            op,
        ),
        (Some(_), other) => Err(MatchError::inconclusive(format!(
            "Cannot compare {:?} numerically",
            other
        ))),
    }
}

fn compare_dates(expected: &Value, supplied: &Value, op: PropertyOperator) -> Result<bool> {
    let cutoff = expected
        .as_str()
        .and_then(|raw| {
            if op.is_relative_date() {
                parse_relative_date(raw)
            } else {
                parse_absolute_date(raw)
            }
        })
        .ok_or_else(|| MatchError::inconclusive("The date set on the flag is not a valid format"))?;

    let supplied_date = supplied_date(supplied)?;

    match op {
        PropertyOperator::IsDateBefore | PropertyOperator::IsRelativeDateBefore => {
            Ok(supplied_date < cutoff)
        }
        PropertyOperator::IsDateAfter | PropertyOperator::IsRelativeDateAfter => {
            Ok(supplied_date > cutoff)
        }
        other => Err(MatchError::InvalidOperator(format!(
            "{} is not a date operator",
            other
        ))),
    }
}

fn supplied_date(supplied: &Value) -> Result<DateTime<Utc>> {
    match supplied {
        Value::String(raw) => parse_absolute_date(raw).ok_or_else(|| {
            MatchError::inconclusive(format!("{} is in an invalid date format", raw))
        }),
        other => Err(MatchError::inconclusive(format!(
            "The date provided {:?} must be a string",
            other
        ))),
    }
}
