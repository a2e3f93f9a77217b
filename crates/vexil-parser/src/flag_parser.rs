//! Flag definition parser
//!
//! Accepts three document shapes, in JSON or YAML:
//! - a single flag object (`{"key": ..., "filters": ...}`)
//! - an array of flag objects
//! - a local evaluation payload (`{"flags": [...], "group_type_mapping": {...}}`)
//!
//! Within a multi-flag document, a definition that fails validation is
//! logged and skipped so the remaining flags stay evaluable.

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use vexil_core::FlagDefinition;

/// A set of flag definitions together with the group type mapping used by
/// group-aggregated flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagSet {
    /// Flag definitions in document order
    #[serde(default)]
    pub flags: Vec<FlagDefinition>,

    /// Group type index (as a string) to group type name
    #[serde(default)]
    pub group_type_mapping: HashMap<String, String>,
}

impl FlagSet {
    /// Look up a flag by key
    pub fn get(&self, key: &str) -> Option<&FlagDefinition> {
        self.flags.iter().find(|flag| flag.key == key)
    }

    /// Number of flags
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if the set holds no flags
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Merge another set into this one.
    ///
    /// Flag keys must stay unique; group type mappings from `other` win on
    /// conflict.
    pub fn merge(&mut self, other: FlagSet) -> Result<()> {
        for flag in other.flags {
            if self.get(&flag.key).is_some() {
                return Err(ParseError::DuplicateFlag(flag.key));
            }
            self.flags.push(flag);
        }
        self.group_type_mapping.extend(other.group_type_mapping);
        Ok(())
    }
}

/// Flag definition parser
pub struct FlagParser;

impl FlagParser {
    /// Parse a single flag definition from JSON
    pub fn parse_json(json_str: &str) -> Result<FlagDefinition> {
        let flag: FlagDefinition = serde_json::from_str(json_str)?;
        flag.validate()?;
        Ok(flag)
    }

    /// Parse a single flag definition from YAML
    pub fn parse_yaml(yaml_str: &str) -> Result<FlagDefinition> {
        let flag: FlagDefinition = serde_yaml::from_str(yaml_str)?;
        flag.validate()?;
        Ok(flag)
    }

    /// Parse a JSON document holding one or more flag definitions
    pub fn parse_definitions(json_str: &str) -> Result<FlagSet> {
        let document: JsonValue = serde_json::from_str(json_str)?;
        Self::from_document(document)
    }

    /// Parse a YAML document holding one or more flag definitions
    pub fn parse_definitions_yaml(yaml_str: &str) -> Result<FlagSet> {
        let document: serde_yaml::Value = serde_yaml::from_str(yaml_str)?;
        Self::from_document(serde_json::to_value(document)?)
    }

    fn from_document(document: JsonValue) -> Result<FlagSet> {
        let mut set = if document.is_array() {
            FlagSet {
                flags: serde_json::from_value(document)?,
                group_type_mapping: HashMap::new(),
            }
        } else if document.get("flags").is_some() {
            serde_json::from_value(document)?
        } else if document.get("key").is_some() {
            FlagSet {
                flags: vec![serde_json::from_value(document)?],
                group_type_mapping: HashMap::new(),
            }
        } else {
            return Err(ParseError::UnsupportedShape(format!(
                "expected a flag, an array of flags or a flags payload, got {}",
                shape_name(&document)
            )));
        };

        // A bad definition only takes itself out of local evaluation
        set.flags.retain(|flag| match flag.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Skipping invalid flag definition '{}': {}", flag.key, e);
                false
            }
        });

        let mut seen = HashSet::new();
        for flag in &set.flags {
            if !seen.insert(flag.key.as_str()) {
                return Err(ParseError::DuplicateFlag(flag.key.clone()));
            }
        }

        log::debug!(
            "Parsed {} flag definitions ({} group types)",
            set.flags.len(),
            set.group_type_mapping.len()
        );

        Ok(set)
    }
}

fn shape_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object without 'key' or 'flags'",
    }
}
