//! Multivariate variant selection

use crate::hash::{hash, VARIANT_SALT};
use vexil_core::FlagDefinition;

/// Bucket range `[min, max)` owned by one variant
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRange {
    pub key: String,
    pub min: f64,
    pub max: f64,
}

impl VariantRange {
    /// Returns true if `bucket` falls inside this range
    pub fn contains(&self, bucket: f64) -> bool {
        self.min <= bucket && bucket < self.max
    }
}

/// Build the cumulative bucket ranges of a flag's variants.
///
/// Ranges follow declaration order and are contiguous. Percentages need not
/// sum to 100; buckets past the total belong to no variant.
pub fn variant_lookup_table(flag: &FlagDefinition) -> Vec<VariantRange> {
    let mut min = 0.0;
    flag.variants()
        .iter()
        .map(|variant| {
            let max = min + variant.rollout_percentage / 100.0;
            let range = VariantRange {
                key: variant.key.clone(),
                min,
                max,
            };
            min = max;
            range
        })
        .collect()
}

/// Select the variant `distinct_id` is bucketed into, if any
pub fn select_variant(flag: &FlagDefinition, distinct_id: &str) -> Option<String> {
    let bucket = hash(&flag.key, distinct_id, VARIANT_SALT);
    let selected = variant_lookup_table(flag)
        .into_iter()
        .find(|range| range.contains(bucket))
        .map(|range| range.key);

    tracing::debug!(
        "Flag {} bucket {} for {} selects variant {:?}",
        flag.key,
        bucket,
        distinct_id,
        selected
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexil_core::Variant;

    fn three_way_flag() -> FlagDefinition {
        FlagDefinition::new("multivariate-flag").with_variants(vec![
            Variant::new("first-variant", 50.0),
            Variant::new("second-variant", 20.0),
            Variant::new("third-variant", 30.0),
        ])
    }

    #[test]
    fn test_lookup_table_is_contiguous() {
        let table = variant_lookup_table(&three_way_flag());
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].min, 0.0);
        assert!((table[0].max - 0.5).abs() < 1e-12);
        for pair in table.windows(2) {
            assert_eq!(pair[0].max, pair[1].min);
            assert!(pair[0].min < pair[0].max);
        }
        assert!((table[2].max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_table_partial_total() {
        let flag = FlagDefinition::new("partial")
            .with_variants(vec![Variant::new("a", 10.0), Variant::new("b", 15.0)]);
        let table = variant_lookup_table(&flag);
        assert!((table[1].max - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_no_variants_selects_none() {
        let flag = FlagDefinition::new("boolean");
        assert!(variant_lookup_table(&flag).is_empty());
        assert_eq!(select_variant(&flag, "user"), None);
    }

    #[test]
    fn test_selection_matches_bucket() {
        // hash("beta", "user-1", "variant") ~= 0.1244
        let flag = FlagDefinition::new("beta")
            .with_variants(vec![Variant::new("control", 10.0), Variant::new("test", 10.0)]);
        assert_eq!(select_variant(&flag, "user-1"), Some("test".to_string()));

        let flag = FlagDefinition::new("beta").with_variants(vec![Variant::new("control", 10.0)]);
        assert_eq!(select_variant(&flag, "user-1"), None);
    }

    #[test]
    fn test_selected_key_is_declared() {
        let flag = three_way_flag();
        for i in 0..500 {
            let variant = select_variant(&flag, &format!("user-{}", i)).unwrap();
            assert!(flag.has_variant(&variant));
        }
    }

    #[test]
    fn test_selection_is_stable() {
        let flag = three_way_flag();
        assert_eq!(select_variant(&flag, "same-id"), select_variant(&flag, "same-id"));
    }
}
