//! Local flag evaluation demo
//!
//! This demo shows:
//! - Building a FlagEvaluator from an inline local-evaluation payload
//! - Evaluating person and group flags for a few subjects
//! - Telling locally resolved flags apart from ones that need the remote service

use tracing_subscriber::EnvFilter;
use vexil_sdk::{EvaluationRequest, FlagEvaluatorBuilder, LocalDecision};

const FLAGS: &str = r#"{
    "group_type_mapping": {"0": "company"},
    "flags": [
        {
            "key": "new-dashboard",
            "filters": {
                "groups": [
                    {
                        "properties": [
                            {"key": "email", "operator": "icontains", "value": "@example.com"}
                        ],
                        "rollout_percentage": 100
                    },
                    {"rollout_percentage": 30}
                ]
            }
        },
        {
            "key": "checkout-experiment",
            "filters": {
                "groups": [{"rollout_percentage": 100}],
                "multivariate": {
                    "variants": [
                        {"key": "control", "rollout_percentage": 50},
                        {"key": "one-page", "rollout_percentage": 50}
                    ]
                }
            }
        },
        {
            "key": "enterprise-reports",
            "filters": {
                "aggregation_group_type_index": 0,
                "groups": [
                    {"properties": [{"key": "seats", "operator": "gte", "value": 50}]}
                ]
            }
        }
    ]
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Local Flag Evaluation Demo ===\n");

    let evaluator = FlagEvaluatorBuilder::new()
        .add_flag_content("demo", FLAGS)
        .enable_tracing(true)
        .build()?;

    println!("Loaded {} flags\n", evaluator.flags().len());

    let subjects = vec![
        (
            "staff member",
            EvaluationRequest::new("user-1").with_person_property("email", "ada@example.com"),
        ),
        (
            "customer at a large company",
            EvaluationRequest::new("user-2")
                .with_person_property("email", "grace@acme.io")
                .with_group("company", "acme")
                .with_group_property("company", "seats", 120),
        ),
        ("anonymous visitor", EvaluationRequest::new("visitor-3")),
    ];

    for (label, request) in &subjects {
        println!("{} ({}):", label, request.distinct_id);

        let all = evaluator.evaluate_all(request)?;
        for (key, value) in &all.values {
            println!("  {}: {}", key, value);
        }
        for key in &all.deferred {
            println!("  {}: needs remote evaluation", key);
        }
        println!();
    }

    match evaluator.evaluate("unknown-flag", &EvaluationRequest::new("user-1"))? {
        LocalDecision::Resolved(value) => println!("unknown-flag resolved to {}", value),
        LocalDecision::Deferred { reason } => println!("unknown-flag deferred: {}", reason),
    }

    Ok(())
}
