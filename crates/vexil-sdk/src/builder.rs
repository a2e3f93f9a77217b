//! Builder pattern for FlagEvaluator

use crate::config::EvaluatorConfig;
use crate::error::{Result, SdkError};
use crate::evaluator::FlagEvaluator;
use std::path::{Path, PathBuf};
use vexil_core::FlagDefinition;
use vexil_parser::{FlagParser, FlagSet};

/// Builder for FlagEvaluator
///
/// # Example
///
/// ```rust,ignore
/// use vexil_sdk::FlagEvaluatorBuilder;
///
/// // From definition files
/// let evaluator = FlagEvaluatorBuilder::new()
///     .add_flag_file("flags/local_evaluation.json")
///     .with_group_type(0, "company")
///     .build()?;
///
/// // Inline definitions (for testing)
/// let evaluator = FlagEvaluatorBuilder::new()
///     .add_flag_content("beta", r#"{"key": "beta", "filters": {"groups": [{}]}}"#)
///     .build()?;
/// ```
pub struct FlagEvaluatorBuilder {
    config: EvaluatorConfig,
    flags: Vec<FlagDefinition>,
}

impl FlagEvaluatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EvaluatorConfig::new(),
            flags: Vec::new(),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a flag definition file
    pub fn add_flag_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.flag_files.push(path.into());
        self
    }

    /// Add flag definition content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `id` - Identifier used in error messages
    /// * `content` - JSON or YAML document with one or more flags
    pub fn add_flag_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.config.flag_contents.push((id.into(), content.into()));
        self
    }

    /// Add an already-built flag definition
    pub fn add_flag(mut self, flag: FlagDefinition) -> Self {
        self.flags.push(flag);
        self
    }

    /// Map a group type index to its name
    pub fn with_group_type(mut self, index: u32, name: impl Into<String>) -> Self {
        self.config = self.config.with_group_type(index, name);
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the evaluator
    pub fn build(self) -> Result<FlagEvaluator> {
        let mut set = FlagSet::default();

        for path in &self.config.flag_files {
            set.merge(load_flag_file(path)?)?;
        }

        for (id, content) in &self.config.flag_contents {
            let parsed = parse_content(content).map_err(|e| {
                SdkError::InvalidFlagFile(format!("{}: {}", id, e))
            })?;
            set.merge(parsed)?;
        }

        for flag in self.flags {
            flag.validate().map_err(vexil_parser::ParseError::from)?;
            set.merge(FlagSet {
                flags: vec![flag],
                ..FlagSet::default()
            })?;
        }

        set.group_type_mapping
            .extend(self.config.group_type_mapping.clone());

        tracing::info!(
            "Loaded {} flag definitions ({} group types)",
            set.len(),
            set.group_type_mapping.len()
        );

        Ok(FlagEvaluator::new(set, self.config))
    }
}

impl Default for FlagEvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn load_flag_file(path: &Path) -> Result<FlagSet> {
    let content = std::fs::read_to_string(path)?;
    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => FlagParser::parse_definitions(&content),
        Some("yaml") | Some("yml") => FlagParser::parse_definitions_yaml(&content),
        _ => {
            return Err(SdkError::InvalidFlagFile(format!(
                "{}: expected a .json, .yaml or .yml file",
                path.display()
            )))
        }
    };

    parsed.map_err(|e| SdkError::InvalidFlagFile(format!("{}: {}", path.display(), e)))
}

/// Inline content is JSON when it opens like a JSON document, YAML otherwise
fn parse_content(content: &str) -> vexil_parser::Result<FlagSet> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        FlagParser::parse_definitions(content)
    } else {
        FlagParser::parse_definitions_yaml(content)
    }
}
