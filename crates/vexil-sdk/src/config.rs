//! Configuration types for FlagEvaluator

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main evaluator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Flag definition file paths (`.json`, `.yaml` or `.yml`)
    #[serde(default)]
    pub flag_files: Vec<PathBuf>,

    /// Flag definition contents (id, content) - alternative to file paths
    #[serde(skip)]
    pub flag_contents: Vec<(String, String)>,

    /// Group type index (as a string) to group type name, merged over any
    /// mapping carried by the definitions themselves
    #[serde(default)]
    pub group_type_mapping: HashMap<String, String>,

    /// Log every local decision at info level
    #[serde(default)]
    pub enable_tracing: bool,
}

impl EvaluatorConfig {
    /// Create a new evaluator configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            SdkError::ConfigError(format!("{}: {}", path.display(), e))
        })
    }

    /// Add a flag definition file
    pub fn with_flag_file(mut self, path: PathBuf) -> Self {
        self.flag_files.push(path);
        self
    }

    /// Map a group type index to its name
    pub fn with_group_type(mut self, index: u32, name: impl Into<String>) -> Self {
        self.group_type_mapping.insert(index.to_string(), name.into());
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}
