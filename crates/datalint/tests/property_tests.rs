//! Property-based tests for profiling, drift and validation.
//!
//! These tests use proptest to generate random datasets and verify that the
//! core invariants hold for all of them.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p datalint --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p datalint --test property_tests
//! ```

use proptest::prelude::*;

use datalint::profile::{DriftDetector, Learner, Profiler};
use datalint::validation::{MissingValuesValidator, OutlierValidator, ValidationRunner, Validator};
use datalint::{Column, Dataset, DriftStatus, Profile, Status, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// A single cell of any kind, missing included.
fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (-1e6f64..1e6).prop_map(Value::Numeric),
        2 => "[a-e]{1,3}".prop_map(Value::Text),
        1 => any::<bool>().prop_map(Value::Boolean),
        1 => Just(Value::Missing),
    ]
}

/// A dataset of 1..4 columns with `rows` rows each.
fn dataset_with(rows: std::ops::Range<usize>) -> impl Strategy<Value = Dataset> {
    (rows, 1usize..4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(any_value(), rows), cols).prop_map(|columns| {
            let columns = columns
                .into_iter()
                .enumerate()
                .map(|(i, values)| Column::new(format!("col_{}", i), values))
                .collect();
            Dataset::new("generated", columns).unwrap()
        })
    })
}

/// A fully populated numeric column.
fn numeric_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e4f64..1e4, 1..200)
}

// =============================================================================
// Profiling
// =============================================================================

proptest! {
    #[test]
    fn summarize_is_deterministic(dataset in dataset_with(1..60)) {
        let profiler = Profiler::new();
        let first = profiler.summarize(&dataset).unwrap();
        let second = profiler.summarize(&dataset).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn summaries_respect_bounds(dataset in dataset_with(1..60)) {
        let rows = dataset.row_count();
        for summary in Profiler::new().summarize(&dataset).unwrap().values() {
            prop_assert!((0.0..=1.0).contains(&summary.null_ratio));
            prop_assert!(summary.cardinality <= rows);
            prop_assert_eq!(summary.numeric.is_some(), summary.declared_type.is_numeric());
            if let Some(stats) = &summary.numeric {
                prop_assert!(stats.min <= stats.q1 && stats.q1 <= stats.q3 && stats.q3 <= stats.max);
                prop_assert!(stats.std >= 0.0);
            }
        }
    }

    #[test]
    fn profile_json_round_trip(dataset in dataset_with(10..60)) {
        let profile = Learner::new().learn(&dataset).unwrap();
        let restored = Profile::from_json(&profile.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored, profile);
    }

    #[test]
    fn self_comparison_is_stable(dataset in dataset_with(10..60)) {
        let profile = Learner::new().learn(&dataset).unwrap();
        let reports = DriftDetector::new().compare(&profile, &dataset).unwrap();

        prop_assert_eq!(reports.len(), dataset.column_count());
        for report in &reports {
            prop_assert_eq!(report.status, DriftStatus::Stable);
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

proptest! {
    #[test]
    fn runner_yields_one_result_per_check(dataset in dataset_with(1..40)) {
        let results = ValidationRunner::new().run(&dataset);
        prop_assert_eq!(results.len(), 5);
    }

    #[test]
    fn no_missing_values_passes(values in numeric_values()) {
        let dataset = Dataset::new("numbers", vec![Column::new("x", values)]).unwrap();
        let result = MissingValuesValidator::default().evaluate(&dataset).unwrap();
        prop_assert_eq!(result.status, Status::Pass);
    }

    #[test]
    fn values_inside_fences_pass(values in numeric_values()) {
        let column = Column::new("x", values.clone());
        let dataset = Dataset::new("numbers", vec![column]).unwrap();
        let summaries = Profiler::new().summarize(&dataset).unwrap();
        let stats = summaries["x"].numeric.clone().unwrap();
        let (lower, upper) = stats.iqr_bounds(1.5);

        let inside: Vec<f64> = values.into_iter().filter(|v| *v >= lower && *v <= upper).collect();
        prop_assume!(inside.len() == dataset.row_count());

        let result = OutlierValidator::default().evaluate(&dataset).unwrap();
        prop_assert_eq!(result.status, Status::Pass);
    }
}
