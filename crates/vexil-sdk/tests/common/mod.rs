//! Common test utilities for SDK integration tests

use vexil_sdk::{EvaluationRequest, FlagEvaluator, FlagEvaluatorBuilder, FlagValue, LocalDecision};

/// Test helper to build a FlagEvaluator from inline definitions
pub struct TestEvaluator {
    builder: FlagEvaluatorBuilder,
}

impl TestEvaluator {
    pub fn new() -> Self {
        Self {
            builder: FlagEvaluatorBuilder::new(),
        }
    }

    /// Load definitions from a JSON string
    pub fn with_json(mut self, json: &str) -> Self {
        self.builder = self.builder.add_flag_content("inline-json", json.trim());
        self
    }

    /// Load definitions from a YAML string
    pub fn with_yaml(mut self, yaml: &str) -> Self {
        self.builder = self.builder.add_flag_content("inline-yaml", yaml.trim());
        self
    }

    pub fn with_group_type(mut self, index: u32, name: &str) -> Self {
        self.builder = self.builder.with_group_type(index, name);
        self
    }

    pub fn build(self) -> FlagEvaluator {
        self.builder.build().expect("Failed to build evaluator")
    }
}

/// Assertions on local decisions
pub trait DecisionAssertions {
    fn assert_value(&self, expected: FlagValue);
    fn assert_deferred(&self);
}

impl DecisionAssertions for LocalDecision {
    fn assert_value(&self, expected: FlagValue) {
        assert_eq!(
            self.value(),
            Some(&expected),
            "Expected {:?}, got {:?}",
            expected,
            self
        );
    }

    fn assert_deferred(&self) {
        assert!(self.requires_remote(), "Expected deferral, got {:?}", self);
    }
}

/// Evaluate a flag, panicking on programmer errors
pub fn decide(evaluator: &FlagEvaluator, key: &str, request: &EvaluationRequest) -> LocalDecision {
    evaluator
        .evaluate(key, request)
        .expect("Evaluation failed")
}
