//! Flag match results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a definite local match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// No condition group was satisfied: the flag is off
    NoMatch,
    /// A condition group was satisfied; `None` means a plain boolean "on"
    Matched(Option<String>),
}

impl MatchResult {
    /// Returns true if the flag is on
    pub fn is_enabled(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    /// Variant key, if the match resolved to one
    pub fn variant(&self) -> Option<&str> {
        match self {
            MatchResult::Matched(Some(variant)) => Some(variant),
            _ => None,
        }
    }
}

/// Flag value as returned to callers: a boolean or a variant key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Boolean(bool),
    Variant(String),
}

impl FlagValue {
    /// Returns true unless the value is `false`
    pub fn is_enabled(&self) -> bool {
        !matches!(self, FlagValue::Boolean(false))
    }
}

impl From<MatchResult> for FlagValue {
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::NoMatch => FlagValue::Boolean(false),
            MatchResult::Matched(None) => FlagValue::Boolean(true),
            MatchResult::Matched(Some(variant)) => FlagValue::Variant(variant),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Boolean(b) => write!(f, "{}", b),
            FlagValue::Variant(v) => f.write_str(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_to_flag_value() {
        assert_eq!(FlagValue::from(MatchResult::NoMatch), FlagValue::Boolean(false));
        assert_eq!(FlagValue::from(MatchResult::Matched(None)), FlagValue::Boolean(true));
        assert_eq!(
            FlagValue::from(MatchResult::Matched(Some("test".to_string()))),
            FlagValue::Variant("test".to_string())
        );
    }

    #[test]
    fn test_match_result_accessors() {
        let result = MatchResult::Matched(Some("control".to_string()));
        assert!(result.is_enabled());
        assert_eq!(result.variant(), Some("control"));
        assert!(!MatchResult::NoMatch.is_enabled());
        assert_eq!(MatchResult::Matched(None).variant(), None);
    }

    #[test]
    fn test_flag_value_serializes_as_bool_or_string() {
        assert_eq!(serde_json::to_string(&FlagValue::Boolean(true)).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&FlagValue::Variant("test".to_string())).unwrap(),
            r#""test""#
        );
        assert!(FlagValue::Variant("x".to_string()).is_enabled());
        assert!(!FlagValue::Boolean(false).is_enabled());
    }
}
