//! Flag matching across condition groups
//!
//! A flag is on when any of its condition groups is satisfied. Groups that
//! force a variant are tried first so overrides win deterministically; ties
//! are broken by declaration order.
//!
//! An inconclusive group does not stop evaluation: a later group may still
//! match definitively. Only when no group matches does an earlier
//! inconclusive group turn the whole result inconclusive, so a flag is never
//! reported off without local proof.

use crate::error::{MatchError, Result};
use crate::hash::{hash, ROLLOUT_SALT};
use crate::property::match_property;
use crate::variant::select_variant;
use vexil_core::{ConditionGroup, FlagDefinition, MatchResult, PropertyValues};

/// Condition groups of a flag in evaluation order, paired with their
/// declaration index.
///
/// The sort key is `(no override, declaration index)`, so the order does
/// not depend on sort stability.
pub fn sorted_condition_groups(flag: &FlagDefinition) -> Vec<(usize, &ConditionGroup)> {
    let mut groups: Vec<(usize, &ConditionGroup)> = flag.groups().iter().enumerate().collect();
    groups.sort_by_key(|(index, group)| (!group.has_variant_override(), *index));
    groups
}

/// Match a flag against a subject's distinct id and property values.
///
/// Returns `MatchResult::Matched` with the override or bucketed variant (or
/// `None` for a plain boolean match), `MatchResult::NoMatch` when every
/// group definitely fails, and `Err(MatchError::Inconclusive)` when no group
/// matched and at least one could not be decided.
pub fn match_feature_flag_properties(
    flag: &FlagDefinition,
    distinct_id: &str,
    values: &PropertyValues,
) -> Result<MatchResult> {
    let mut inconclusive_reason: Option<String> = None;

    for (index, group) in sorted_condition_groups(flag) {
        match is_condition_match(flag, distinct_id, group, values) {
            Ok(true) => {
                let variant = match &group.variant {
                    Some(variant) if flag.has_variant(variant) => Some(variant.clone()),
                    _ => select_variant(flag, distinct_id),
                };
                tracing::debug!(
                    "Flag {} matched group {} for {} with variant {:?}",
                    flag.key,
                    index,
                    distinct_id,
                    variant
                );
                return Ok(MatchResult::Matched(variant));
            }
            Ok(false) => {}
            Err(MatchError::Inconclusive(reason)) => {
                tracing::debug!(
                    "Flag {} group {} inconclusive for {}: {}",
                    flag.key,
                    index,
                    distinct_id,
                    reason
                );
                inconclusive_reason.get_or_insert(reason);
            }
            Err(other) => return Err(other),
        }
    }

    match inconclusive_reason {
        Some(reason) => Err(MatchError::inconclusive(format!(
            "Can't determine if feature flag '{}' is enabled or not with given properties: {}",
            flag.key, reason
        ))),
        None => Ok(MatchResult::NoMatch),
    }
}

/// Evaluate one condition group: all property conditions, then the rollout.
fn is_condition_match(
    flag: &FlagDefinition,
    distinct_id: &str,
    group: &ConditionGroup,
    values: &PropertyValues,
) -> Result<bool> {
    for condition in &group.properties {
        if !match_property(condition, values)? {
            return Ok(false);
        }
    }

    match group.rollout_percentage {
        Some(percentage) => Ok(hash(&flag.key, distinct_id, ROLLOUT_SALT) <= percentage / 100.0),
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexil_core::{PropertyCondition, PropertyOperator, Value, Variant};

    fn props(pairs: &[(&str, &str)]) -> PropertyValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    fn plan_is(plan: &str) -> PropertyCondition {
        PropertyCondition::new("plan", PropertyOperator::Exact, plan)
    }

    fn variants() -> Vec<Variant> {
        vec![
            Variant::new("first", 34.0),
            Variant::new("second", 33.0),
            Variant::new("third", 33.0),
        ]
    }

    #[test]
    fn test_sort_puts_overrides_first_and_keeps_order() {
        let flag = FlagDefinition::new("sorted")
            .with_group(ConditionGroup::new().with_rollout(10.0))
            .with_group(ConditionGroup::new().with_variant("b"))
            .with_group(ConditionGroup::new().with_rollout(20.0))
            .with_group(ConditionGroup::new().with_variant("a"));

        let order: Vec<usize> = sorted_condition_groups(&flag)
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_simple_match() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new().with_property(plan_is("pro")).with_rollout(100.0));
        let result = match_feature_flag_properties(&flag, "user-1", &props(&[("plan", "pro")]));
        assert_eq!(result, Ok(MatchResult::Matched(None)));
    }

    #[test]
    fn test_property_mismatch_is_no_match() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new().with_property(plan_is("pro")));
        let result = match_feature_flag_properties(&flag, "user-1", &props(&[("plan", "free")]));
        assert_eq!(result, Ok(MatchResult::NoMatch));
    }

    #[test]
    fn test_empty_group_matches_everyone() {
        let flag = FlagDefinition::new("everyone").with_group(ConditionGroup::new());
        let result = match_feature_flag_properties(&flag, "anyone", &props(&[]));
        assert_eq!(result, Ok(MatchResult::Matched(None)));
    }

    #[test]
    fn test_no_groups_is_no_match() {
        let flag = FlagDefinition::new("nothing");
        assert_eq!(
            match_feature_flag_properties(&flag, "anyone", &props(&[])),
            Ok(MatchResult::NoMatch)
        );
    }

    #[test]
    fn test_rollout_gates_on_bucket() {
        // hash("beta", "user-1", "") ~= 0.3977
        let flag = FlagDefinition::new("beta").with_group(ConditionGroup::new().with_rollout(40.0));
        assert!(match_feature_flag_properties(&flag, "user-1", &props(&[]))
            .unwrap()
            .is_enabled());

        let flag = FlagDefinition::new("beta").with_group(ConditionGroup::new().with_rollout(39.0));
        assert_eq!(
            match_feature_flag_properties(&flag, "user-1", &props(&[])),
            Ok(MatchResult::NoMatch)
        );
    }

    #[test]
    fn test_zero_rollout_never_matches() {
        let flag = FlagDefinition::new("off").with_group(ConditionGroup::new().with_rollout(0.0));
        for i in 0..100 {
            assert_eq!(
                match_feature_flag_properties(&flag, &format!("u{}", i), &props(&[])),
                Ok(MatchResult::NoMatch)
            );
        }
    }

    #[test]
    fn test_override_group_sorted_first() {
        let flag = FlagDefinition::new("override")
            .with_group(ConditionGroup::new().with_property(plan_is("pro")))
            .with_group(ConditionGroup::new().with_rollout(100.0).with_variant("second"))
            .with_variants(variants());

        let result = match_feature_flag_properties(&flag, "user-1", &props(&[("plan", "pro")]));
        assert_eq!(result, Ok(MatchResult::Matched(Some("second".to_string()))));
    }

    #[test]
    fn test_first_declared_override_wins() {
        let flag = FlagDefinition::new("override")
            .with_group(ConditionGroup::new().with_variant("third"))
            .with_group(ConditionGroup::new().with_variant("first"))
            .with_variants(variants());

        let result = match_feature_flag_properties(&flag, "user-1", &props(&[]));
        assert_eq!(result, Ok(MatchResult::Matched(Some("third".to_string()))));
    }

    #[test]
    fn test_undeclared_override_falls_back_to_bucketing() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new().with_variant("ghost"))
            .with_variants(vec![Variant::new("control", 10.0), Variant::new("test", 10.0)]);

        // hash("beta", "user-1", "variant") ~= 0.1244 lands in "test"
        let result = match_feature_flag_properties(&flag, "user-1", &props(&[]));
        assert_eq!(result, Ok(MatchResult::Matched(Some("test".to_string()))));
    }

    #[test]
    fn test_bucket_past_variants_is_boolean_true() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new())
            .with_variants(vec![Variant::new("control", 10.0)]);
        let result = match_feature_flag_properties(&flag, "user-1", &props(&[]));
        assert_eq!(result, Ok(MatchResult::Matched(None)));
    }

    #[test]
    fn test_missing_property_is_inconclusive() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new().with_property(plan_is("pro")));
        let err = match_feature_flag_properties(&flag, "user-1", &props(&[])).unwrap_err();
        assert!(err.is_inconclusive());
    }

    #[test]
    fn test_later_group_match_beats_earlier_inconclusive() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new().with_property(plan_is("pro")))
            .with_group(ConditionGroup::new().with_property(PropertyCondition::new(
                "country",
                PropertyOperator::Exact,
                "NZ",
            )));

        let result = match_feature_flag_properties(&flag, "user-1", &props(&[("country", "nz")]));
        assert_eq!(result, Ok(MatchResult::Matched(None)));
    }

    #[test]
    fn test_inconclusive_and_failed_groups_are_inconclusive() {
        let flag = FlagDefinition::new("beta")
            .with_group(ConditionGroup::new().with_property(plan_is("pro")))
            .with_group(ConditionGroup::new().with_property(PropertyCondition::new(
                "country",
                PropertyOperator::Exact,
                "NZ",
            )));

        let err = match_feature_flag_properties(&flag, "user-1", &props(&[("country", "US")]))
            .unwrap_err();
        assert!(err.is_inconclusive());
    }

    #[test]
    fn test_failing_property_short_circuits_group() {
        // The second condition would be inconclusive, but the first already fails
        let flag = FlagDefinition::new("beta").with_group(
            ConditionGroup::new()
                .with_property(plan_is("pro"))
                .with_property(PropertyCondition::new("email", PropertyOperator::IsNotSet, Value::Null)),
        );
        let result = match_feature_flag_properties(&flag, "user-1", &props(&[("plan", "free")]));
        assert_eq!(result, Ok(MatchResult::NoMatch));
    }
}
