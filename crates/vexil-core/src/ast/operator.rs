//! Operators for flag property conditions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property condition operators
///
/// Serialized in `snake_case` (`"is_not"`, `"is_relative_date_before"`, ...).
/// Operator names outside the known set deserialize to `Unknown` so a single
/// unfamiliar condition does not make the whole definition unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyOperator {
    // Equality operators
    /// Case-insensitive equality, or membership for array values
    #[default]
    Exact,
    /// Negation of `Exact`
    IsNot,

    // Presence operators
    /// Property key is present
    IsSet,
    /// Property key is absent (never decidable locally)
    IsNotSet,

    // String operators
    /// Case-insensitive substring
    Icontains,
    /// Negation of `Icontains`
    NotIcontains,
    /// Regular expression match
    Regex,
    /// Negation of `Regex`
    NotRegex,

    // Ordering operators
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,

    // Date operators
    /// Supplied date strictly before an absolute date
    IsDateBefore,
    /// Supplied date strictly after an absolute date
    IsDateAfter,
    /// Supplied date strictly before a relative cutoff (`"7d"`, `"3m"`)
    IsRelativeDateBefore,
    /// Supplied date strictly after a relative cutoff
    IsRelativeDateAfter,

    /// Any operator name this engine does not know
    #[serde(other)]
    Unknown,
}

impl PropertyOperator {
    /// Returns true if the condition value is a relative date token
    pub fn is_relative_date(&self) -> bool {
        matches!(
            self,
            PropertyOperator::IsRelativeDateBefore | PropertyOperator::IsRelativeDateAfter
        )
    }

    /// Wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyOperator::Exact => "exact",
            PropertyOperator::IsNot => "is_not",
            PropertyOperator::IsSet => "is_set",
            PropertyOperator::IsNotSet => "is_not_set",
            PropertyOperator::Icontains => "icontains",
            PropertyOperator::NotIcontains => "not_icontains",
            PropertyOperator::Regex => "regex",
            PropertyOperator::NotRegex => "not_regex",
            PropertyOperator::Gt => "gt",
            PropertyOperator::Gte => "gte",
            PropertyOperator::Lt => "lt",
            PropertyOperator::Lte => "lte",
            PropertyOperator::IsDateBefore => "is_date_before",
            PropertyOperator::IsDateAfter => "is_date_after",
            PropertyOperator::IsRelativeDateBefore => "is_relative_date_before",
            PropertyOperator::IsRelativeDateAfter => "is_relative_date_after",
            PropertyOperator::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PropertyOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
