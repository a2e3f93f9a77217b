//! Flag evaluator
//!
//! Applies the flag-level rules around the condition matcher: inactive
//! flags are off, experience-continuity flags always defer, and
//! group-aggregated flags are matched against the caller's group instead of
//! the person.
//!
//! Before matching, `$current_distinct_id` is added to the person properties
//! and `$group_key` to the group's properties; values supplied by the caller
//! take precedence.

use crate::config::EvaluatorConfig;
use crate::error::Result;
use std::collections::{BTreeMap, HashMap};
use vexil_core::{FlagDefinition, FlagValue, MatchResult, PropertyValues, Value};
use vexil_parser::FlagSet;
use vexil_runtime::{match_feature_flag_properties, MatchError};

/// Person property holding the distinct id being evaluated
pub const CURRENT_DISTINCT_ID_PROPERTY: &str = "$current_distinct_id";

/// Group property holding the key of the group being evaluated
pub const GROUP_KEY_PROPERTY: &str = "$group_key";

/// Subject of an evaluation: a person, the groups they belong to, and the
/// properties known locally for each
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest {
    /// Distinct id of the person
    pub distinct_id: String,

    /// Group type name to group key
    pub groups: HashMap<String, String>,

    /// Properties of the person
    pub person_properties: PropertyValues,

    /// Group type name to properties of that group
    pub group_properties: HashMap<String, PropertyValues>,
}

impl EvaluationRequest {
    /// Create a request for a distinct id with no known properties
    pub fn new(distinct_id: impl Into<String>) -> Self {
        Self {
            distinct_id: distinct_id.into(),
            ..Self::default()
        }
    }

    /// Add the key of a group the person belongs to
    pub fn with_group(mut self, group_type: impl Into<String>, group_key: impl Into<String>) -> Self {
        self.groups.insert(group_type.into(), group_key.into());
        self
    }

    /// Add a person property
    pub fn with_person_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.person_properties.insert(key.into(), value.into());
        self
    }

    /// Replace all person properties
    pub fn with_person_properties(mut self, properties: PropertyValues) -> Self {
        self.person_properties = properties;
        self
    }

    /// Add a property of a group
    pub fn with_group_property(
        mut self,
        group_type: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.group_properties
            .entry(group_type.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Person properties as seen by the matcher: the supplied properties
    /// plus `$current_distinct_id`, unless the caller set it
    pub fn effective_person_properties(&self) -> PropertyValues {
        let mut properties = self.person_properties.clone();
        properties
            .entry(CURRENT_DISTINCT_ID_PROPERTY.to_string())
            .or_insert_with(|| Value::String(self.distinct_id.clone()));
        properties
    }

    /// Properties of the group of `group_type` the person belongs to, plus
    /// `$group_key` unless the caller set it. `None` when no group key was
    /// supplied for that type.
    pub fn effective_group_properties(&self, group_type: &str) -> Option<(&str, PropertyValues)> {
        let group_key = self.groups.get(group_type)?;
        let mut properties = self
            .group_properties
            .get(group_type)
            .cloned()
            .unwrap_or_default();
        properties
            .entry(GROUP_KEY_PROPERTY.to_string())
            .or_insert_with(|| Value::String(group_key.clone()));
        Some((group_key.as_str(), properties))
    }
}

/// Outcome of evaluating one flag locally
#[derive(Debug, Clone, PartialEq)]
pub enum LocalDecision {
    /// The flag value is known
    Resolved(FlagValue),
    /// Local data cannot settle the flag; ask the remote service
    Deferred { reason: String },
}

impl LocalDecision {
    /// Resolved value, if any
    pub fn value(&self) -> Option<&FlagValue> {
        match self {
            LocalDecision::Resolved(value) => Some(value),
            LocalDecision::Deferred { .. } => None,
        }
    }

    /// Returns true if the caller must fall back to remote evaluation
    pub fn requires_remote(&self) -> bool {
        matches!(self, LocalDecision::Deferred { .. })
    }
}

/// Outcome of evaluating every known flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllFlags {
    /// Values of flags settled locally
    pub values: BTreeMap<String, FlagValue>,

    /// Keys of flags that could not be settled locally
    pub deferred: Vec<String>,

    /// True if any flag needs remote evaluation
    pub fallback_required: bool,
}

/// Local flag evaluator
#[derive(Debug)]
pub struct FlagEvaluator {
    flags: FlagSet,
    config: EvaluatorConfig,
}

impl FlagEvaluator {
    /// Create an evaluator over a set of definitions
    pub fn new(flags: FlagSet, config: EvaluatorConfig) -> Self {
        Self { flags, config }
    }

    /// The definitions this evaluator knows
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Evaluate a flag by key.
    ///
    /// Unknown keys are deferred, since only the remote service knows them.
    pub fn evaluate(&self, key: &str, request: &EvaluationRequest) -> Result<LocalDecision> {
        match self.flags.get(key) {
            Some(flag) => self.evaluate_definition(flag, request),
            None => Ok(LocalDecision::Deferred {
                reason: format!("Flag '{}' is not defined locally", key),
            }),
        }
    }

    /// Evaluate a definition that need not belong to this evaluator's set
    pub fn evaluate_definition(
        &self,
        flag: &FlagDefinition,
        request: &EvaluationRequest,
    ) -> Result<LocalDecision> {
        let decision = match self.compute_flag_locally(flag, request) {
            Ok(result) => LocalDecision::Resolved(FlagValue::from(result)),
            Err(MatchError::Inconclusive(reason)) => LocalDecision::Deferred { reason },
            Err(other) => return Err(other.into()),
        };

        if self.config.enable_tracing {
            tracing::info!(
                "Flag {} for {}: {:?}",
                flag.key,
                request.distinct_id,
                decision
            );
        }

        Ok(decision)
    }

    /// Whether a flag is on: `None` when it must be evaluated remotely
    pub fn is_enabled(&self, key: &str, request: &EvaluationRequest) -> Result<Option<bool>> {
        Ok(self
            .evaluate(key, request)?
            .value()
            .map(FlagValue::is_enabled))
    }

    /// Evaluate every known flag
    pub fn evaluate_all(&self, request: &EvaluationRequest) -> Result<AllFlags> {
        let mut all = AllFlags::default();

        for flag in &self.flags.flags {
            match self.evaluate_definition(flag, request)? {
                LocalDecision::Resolved(value) => {
                    all.values.insert(flag.key.clone(), value);
                }
                LocalDecision::Deferred { .. } => {
                    all.deferred.push(flag.key.clone());
                    all.fallback_required = true;
                }
            }
        }

        Ok(all)
    }

    fn compute_flag_locally(
        &self,
        flag: &FlagDefinition,
        request: &EvaluationRequest,
    ) -> std::result::Result<MatchResult, MatchError> {
        if flag.ensure_experience_continuity {
            return Err(MatchError::inconclusive(
                "Flag has experience continuity enabled",
            ));
        }

        if !flag.active {
            return Ok(MatchResult::NoMatch);
        }

        let Some(index) = flag.filters.aggregation_group_type_index else {
            return match_feature_flag_properties(
                flag,
                &request.distinct_id,
                &request.effective_person_properties(),
            );
        };

        let group_type = self
            .flags
            .group_type_mapping
            .get(&index.to_string())
            .ok_or_else(|| {
                tracing::warn!(
                    "Unknown group type index {} for feature flag {}",
                    index,
                    flag.key
                );
                MatchError::inconclusive("Flag has unknown group type index")
            })?;

        let Some((group_key, properties)) = request.effective_group_properties(group_type) else {
            tracing::warn!(
                "Can't compute group feature flag {} without group names passed in",
                flag.key
            );
            return Ok(MatchResult::NoMatch);
        };

        match_feature_flag_properties(flag, group_key, &properties)
    }
}
