//! Flag definition AST

use super::operator::PropertyOperator;
use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Feature flag definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Unique flag key
    pub key: String,

    /// Whether the flag is switched on at all
    #[serde(default = "default_active")]
    pub active: bool,

    /// Flags that must keep a subject's variant across identity changes;
    /// these can only be evaluated by the remote service
    #[serde(default)]
    pub ensure_experience_continuity: bool,

    /// Rule set of the flag
    #[serde(default)]
    pub filters: FlagFilters,
}

/// Rule set of a flag: condition groups, variants and aggregation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlagFilters {
    /// Alternative condition groups; the flag is on if any group is satisfied
    #[serde(default)]
    pub groups: Vec<ConditionGroup>,

    /// Multivariate variants, if the flag is not a plain boolean flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multivariate: Option<MultivariateSpec>,

    /// Group type index when the flag is evaluated per group instead of per person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_group_type_index: Option<u32>,
}

/// One alternative rule set within a flag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionGroup {
    /// Property conditions, all of which must hold
    #[serde(default)]
    pub properties: Vec<PropertyCondition>,

    /// Percentage (0-100) of the bucketed population admitted by this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollout_percentage: Option<f64>,

    /// Variant forced on subjects matching this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// A single property condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCondition {
    /// Property key looked up in the supplied values
    pub key: String,

    /// Comparison operator (defaults to `exact`)
    #[serde(default)]
    pub operator: PropertyOperator,

    /// Value to compare against: a scalar or an array of scalars
    #[serde(default = "null_value")]
    pub value: Value,

    /// Property namespace (`person`, `group`, ...) as sent by the flag registry
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

fn null_value() -> Value {
    Value::Null
}

/// Multivariate configuration of a flag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultivariateSpec {
    /// Ordered variants; list order defines the bucket ranges
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A multivariate variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant key returned to callers
    pub key: String,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Share (0-100) of the bucketed population assigned to this variant
    pub rollout_percentage: f64,
}

impl FlagDefinition {
    /// Create an active flag without any condition group
    pub fn new(key: impl Into<String>) -> Self {
        FlagDefinition {
            key: key.into(),
            active: true,
            ensure_experience_continuity: false,
            filters: FlagFilters::default(),
        }
    }

    /// Add a condition group
    pub fn with_group(mut self, group: ConditionGroup) -> Self {
        self.filters.groups.push(group);
        self
    }

    /// Set the multivariate variants
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.filters.multivariate = Some(MultivariateSpec { variants });
        self
    }

    /// Set whether the flag is active
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Evaluate this flag per group of the given type index
    pub fn with_aggregation_group_type_index(mut self, index: u32) -> Self {
        self.filters.aggregation_group_type_index = Some(index);
        self
    }

    /// Condition groups in definition order
    pub fn groups(&self) -> &[ConditionGroup] {
        &self.filters.groups
    }

    /// Declared variants in definition order (empty for boolean flags)
    pub fn variants(&self) -> &[Variant] {
        self.filters
            .multivariate
            .as_ref()
            .map(|m| m.variants.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if a variant with this key is declared
    pub fn has_variant(&self, key: &str) -> bool {
        self.variants().iter().any(|v| v.key == key)
    }

    /// Check structural constraints of the definition.
    ///
    /// Percentages must lie in `[0, 100]`, variant keys must be non-empty and
    /// unique. Variant percentages need not sum to 100.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(CoreError::InvalidValue("flag key must not be empty".to_string()));
        }

        for (index, group) in self.groups().iter().enumerate() {
            if let Some(percentage) = group.rollout_percentage {
                check_percentage(percentage).map_err(|message| {
                    CoreError::InvalidValue(format!(
                        "flag '{}' group {}: rollout_percentage {}",
                        self.key, index, message
                    ))
                })?;
            }
        }

        let mut seen = std::collections::HashSet::new();
        for variant in self.variants() {
            if variant.key.is_empty() {
                return Err(CoreError::InvalidValue(format!(
                    "flag '{}': variant key must not be empty",
                    self.key
                )));
            }
            if !seen.insert(variant.key.as_str()) {
                return Err(CoreError::InvalidValue(format!(
                    "flag '{}': duplicate variant '{}'",
                    self.key, variant.key
                )));
            }
            check_percentage(variant.rollout_percentage).map_err(|message| {
                CoreError::InvalidValue(format!(
                    "flag '{}' variant '{}': rollout_percentage {}",
                    self.key, variant.key, message
                ))
            })?;
        }

        let total: f64 = self.variants().iter().map(|v| v.rollout_percentage).sum();
        if total > 100.0 {
            log::warn!(
                "flag '{}' variants sum to {}%; buckets past 100% are unreachable",
                self.key,
                total
            );
        }

        Ok(())
    }
}

fn check_percentage(percentage: f64) -> std::result::Result<(), String> {
    if percentage.is_finite() && (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(format!("{} is outside 0..=100", percentage))
    }
}

impl ConditionGroup {
    /// Create an empty group (matches everyone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property condition
    pub fn with_property(mut self, condition: PropertyCondition) -> Self {
        self.properties.push(condition);
        self
    }

    /// Set the rollout percentage
    pub fn with_rollout(mut self, percentage: f64) -> Self {
        self.rollout_percentage = Some(percentage);
        self
    }

    /// Force a variant for subjects matching this group
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Returns true if the group carries a variant override
    pub fn has_variant_override(&self) -> bool {
        self.variant.is_some()
    }
}

impl PropertyCondition {
    /// Create a new property condition
    pub fn new(key: impl Into<String>, operator: PropertyOperator, value: impl Into<Value>) -> Self {
        PropertyCondition {
            key: key.into(),
            operator,
            value: value.into(),
            property_type: None,
        }
    }
}

impl Variant {
    /// Create a new variant
    pub fn new(key: impl Into<String>, rollout_percentage: f64) -> Self {
        Variant {
            key: key.into(),
            name: None,
            rollout_percentage,
        }
    }
}
