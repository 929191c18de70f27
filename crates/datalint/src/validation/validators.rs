//! Dataset-level checks for machine-learning readiness.

use indexmap::IndexMap;
use serde_json::{json, Value};

use super::result::{Status, ValidationResult, DATASET_KEY};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::input::Dataset;
use crate::profile::statistics::{observed_kinds, paired_numeric, pearson};
use crate::profile::Profiler;
use crate::schema::{ColumnSummary, DeclaredType};

/// Column summaries keyed by column name, in dataset order.
pub type Summaries = IndexMap<String, ColumnSummary>;

/// Trait for validators.
pub trait Validator {
    /// Stable identifier reported as `check_name`.
    fn name(&self) -> &'static str;

    /// Run the check against a dataset whose summaries are already computed.
    fn validate(&self, dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult>;

    /// Summarize with the default profiler, then validate.
    fn evaluate(&self, dataset: &Dataset) -> Result<ValidationResult> {
        let summaries = Profiler::new().summarize(dataset)?;
        self.validate(dataset, &summaries)
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

// ============================================================================
// Missing Values
// ============================================================================

/// Flags columns with a high share of missing values.
#[derive(Debug, Clone)]
pub struct MissingValuesValidator {
    /// Null ratio above which the check warns.
    warn_ratio: f64,
    /// Null ratio above which the check fails.
    fail_ratio: f64,
}

impl MissingValuesValidator {
    pub fn new(warn_ratio: f64, fail_ratio: f64) -> Self {
        Self {
            warn_ratio,
            fail_ratio,
        }
    }
}

impl Default for MissingValuesValidator {
    fn default() -> Self {
        let config = ValidationConfig::default();
        Self::new(config.missing_warn_ratio, config.missing_fail_ratio)
    }
}

impl Validator for MissingValuesValidator {
    fn name(&self) -> &'static str {
        "missing_values"
    }

    fn validate(&self, _dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult> {
        let offending: Vec<&ColumnSummary> = summaries
            .values()
            .filter(|s| s.null_ratio > self.warn_ratio)
            .collect();

        if offending.is_empty() {
            return Ok(ValidationResult::new(
                self.name(),
                Status::Pass,
                format!(
                    "No column has more than {} missing values",
                    percent(self.warn_ratio)
                ),
            ));
        }

        let status = if offending.iter().any(|s| s.null_ratio > self.fail_ratio) {
            Status::Fail
        } else {
            Status::Warn
        };

        let details = offending
            .iter()
            .map(|s| (s.name.clone(), json!(s.null_ratio)))
            .collect();
        let recommendations = offending
            .iter()
            .map(|s| {
                format!(
                    "Column '{}' has {} missing values. Consider imputation, or removal if the gap cannot be filled.",
                    s.name,
                    percent(s.null_ratio)
                )
            })
            .collect();

        Ok(ValidationResult::new(
            self.name(),
            status,
            format!(
                "{} column(s) exceed {} missing values",
                offending.len(),
                percent(self.warn_ratio)
            ),
        )
        .with_details(details)
        .with_recommendations(recommendations))
    }
}

// ============================================================================
// Data Type Consistency
// ============================================================================

/// Fails when a column mixes scalar kinds.
#[derive(Debug, Clone, Default)]
pub struct DataTypeValidator;

impl Validator for DataTypeValidator {
    fn name(&self) -> &'static str {
        "data_types"
    }

    fn validate(&self, dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult> {
        let mut details = IndexMap::new();
        for column in dataset.columns() {
            let mixed = summaries
                .get(&column.name)
                .is_some_and(|s| s.declared_type == DeclaredType::Mixed);
            if mixed {
                let kinds: Vec<&str> = observed_kinds(column).iter().map(|k| k.label()).collect();
                details.insert(
                    column.name.clone(),
                    json!({ "declared_type": DeclaredType::Mixed, "kinds": kinds }),
                );
            }
        }

        if details.is_empty() {
            return Ok(ValidationResult::new(
                self.name(),
                Status::Pass,
                "All columns hold a single value type",
            ));
        }

        let names: Vec<&str> = details.keys().map(String::as_str).collect();
        let message = format!("Mixed value types in column(s): {}", names.join(", "));
        Ok(ValidationResult::new(self.name(), Status::Fail, message)
            .with_details(details)
            .with_recommendations(vec![
                "Consider explicit type conversion or data cleaning".to_string(),
            ]))
    }
}

// ============================================================================
// Outlier Detection
// ============================================================================

/// IQR-fence outlier detection on numeric columns.
#[derive(Debug, Clone)]
pub struct OutlierValidator {
    /// IQR fence multiplier.
    iqr_multiplier: f64,
    /// Outlier ratio above which the check fails.
    fail_ratio: f64,
}

impl OutlierValidator {
    pub fn new(iqr_multiplier: f64, fail_ratio: f64) -> Self {
        Self {
            iqr_multiplier,
            fail_ratio,
        }
    }
}

impl Default for OutlierValidator {
    fn default() -> Self {
        let config = ValidationConfig::default();
        Self::new(config.iqr_multiplier, config.outlier_fail_ratio)
    }
}

impl Validator for OutlierValidator {
    fn name(&self) -> &'static str {
        "outliers"
    }

    fn validate(&self, dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult> {
        let mut details = IndexMap::new();
        let mut worst_ratio: f64 = 0.0;

        for column in dataset.columns() {
            let Some(stats) = summaries.get(&column.name).and_then(|s| s.numeric.as_ref()) else {
                continue;
            };

            let values = column.numeric_values();
            let (lower, upper) = stats.iqr_bounds(self.iqr_multiplier);
            let count = values
                .iter()
                .filter(|&&v| stats.is_outlier_iqr(v, self.iqr_multiplier))
                .count();
            if count == 0 {
                continue;
            }

            let ratio = count as f64 / values.len() as f64;
            worst_ratio = worst_ratio.max(ratio);
            details.insert(
                column.name.clone(),
                json!({
                    "count": count,
                    "ratio": ratio,
                    "lower_bound": lower,
                    "upper_bound": upper,
                }),
            );
        }

        if details.is_empty() {
            return Ok(ValidationResult::new(
                self.name(),
                Status::Pass,
                "No values outside the IQR fences",
            ));
        }

        let status = if worst_ratio > self.fail_ratio {
            Status::Fail
        } else {
            Status::Warn
        };
        let recommendations = details
            .keys()
            .map(|name| {
                format!(
                    "Inspect outliers in '{}'; clip, transform or remove them if they are errors.",
                    name
                )
            })
            .collect();

        Ok(ValidationResult::new(
            self.name(),
            status,
            format!(
                "{} numeric column(s) have outliers (worst ratio {})",
                details.len(),
                percent(worst_ratio)
            ),
        )
        .with_details(details)
        .with_recommendations(recommendations))
    }
}

// ============================================================================
// High Correlation
// ============================================================================

/// Warns about nearly collinear numeric column pairs.
#[derive(Debug, Clone)]
pub struct CorrelationValidator {
    /// Absolute correlation above which a pair is reported.
    threshold: f64,
}

impl CorrelationValidator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for CorrelationValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default().correlation_threshold)
    }
}

impl Validator for CorrelationValidator {
    fn name(&self) -> &'static str {
        "correlations"
    }

    fn validate(&self, dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult> {
        let numeric: Vec<_> = dataset
            .columns()
            .iter()
            .filter(|c| {
                summaries
                    .get(&c.name)
                    .is_some_and(|s| s.declared_type.is_numeric())
            })
            .collect();

        let mut pairs: Vec<Value> = Vec::new();
        let mut recommendations = Vec::new();
        for (i, a) in numeric.iter().enumerate() {
            for b in &numeric[i + 1..] {
                let Some(r) = pearson(&paired_numeric(a, b)) else {
                    continue;
                };
                if r.abs() > self.threshold {
                    pairs.push(json!({ "columns": [a.name, b.name], "correlation": r }));
                    recommendations.push(format!(
                        "'{}' and '{}' are nearly collinear; consider dropping one.",
                        a.name, b.name
                    ));
                }
            }
        }

        if pairs.is_empty() {
            return Ok(ValidationResult::new(
                self.name(),
                Status::Pass,
                format!("No numeric pair exceeds |r| > {}", self.threshold),
            ));
        }

        let message = format!(
            "{} numeric column pair(s) exceed |r| > {}",
            pairs.len(),
            self.threshold
        );
        Ok(ValidationResult::new(self.name(), Status::Warn, message)
            .with_detail(DATASET_KEY, Value::Array(pairs))
            .with_recommendations(recommendations))
    }
}

// ============================================================================
// Constant Columns
// ============================================================================

/// Fails on columns with no useful variation.
#[derive(Debug, Clone)]
pub struct ConstantColumnValidator {
    /// Columns with at most this many distinct values are constant.
    max_cardinality: usize,
}

impl ConstantColumnValidator {
    pub fn new(max_cardinality: usize) -> Self {
        Self { max_cardinality }
    }
}

impl Default for ConstantColumnValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default().constant_max_cardinality)
    }
}

impl Validator for ConstantColumnValidator {
    fn name(&self) -> &'static str {
        "constant_columns"
    }

    fn validate(&self, _dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult> {
        let details: IndexMap<String, Value> = summaries
            .values()
            .filter(|s| s.cardinality <= self.max_cardinality)
            .map(|s| (s.name.clone(), json!({ "cardinality": s.cardinality })))
            .collect();

        if details.is_empty() {
            return Ok(ValidationResult::new(
                self.name(),
                Status::Pass,
                "Every column has more than one distinct value",
            ));
        }

        let names: Vec<&str> = details.keys().map(String::as_str).collect();
        let message = format!("Constant column(s): {}", names.join(", "));
        let recommendations = names
            .iter()
            .map(|name| format!("Column '{}' carries no information; consider dropping it.", name))
            .collect();

        Ok(ValidationResult::new(self.name(), Status::Fail, message)
            .with_details(details)
            .with_recommendations(recommendations))
    }
}

// ============================================================================
// Registration
// ============================================================================

/// The closed set of registered checks.
#[derive(Debug, Clone)]
pub enum Check {
    MissingValues(MissingValuesValidator),
    DataTypes(DataTypeValidator),
    Outliers(OutlierValidator),
    Correlations(CorrelationValidator),
    ConstantColumns(ConstantColumnValidator),
}

impl Check {
    /// All checks in evaluation order, configured from thresholds.
    pub fn all(config: &ValidationConfig) -> Vec<Check> {
        vec![
            Check::MissingValues(MissingValuesValidator::new(
                config.missing_warn_ratio,
                config.missing_fail_ratio,
            )),
            Check::DataTypes(DataTypeValidator),
            Check::Outliers(OutlierValidator::new(
                config.iqr_multiplier,
                config.outlier_fail_ratio,
            )),
            Check::Correlations(CorrelationValidator::new(config.correlation_threshold)),
            Check::ConstantColumns(ConstantColumnValidator::new(
                config.constant_max_cardinality,
            )),
        ]
    }

    fn validator(&self) -> &dyn Validator {
        match self {
            Check::MissingValues(v) => v,
            Check::DataTypes(v) => v,
            Check::Outliers(v) => v,
            Check::Correlations(v) => v,
            Check::ConstantColumns(v) => v,
        }
    }
}

impl Validator for Check {
    fn name(&self) -> &'static str {
        self.validator().name()
    }

    fn validate(&self, dataset: &Dataset, summaries: &Summaries) -> Result<ValidationResult> {
        self.validator().validate(dataset, summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, Value};

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset::new("test", columns).unwrap()
    }

    #[test]
    fn test_missing_values_pass() {
        let data = dataset(vec![Column::new("a", [1.0, 2.0, 3.0])]);
        let result = MissingValuesValidator::default().evaluate(&data).unwrap();
        assert_eq!(result.status, Status::Pass);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_missing_values_warn_and_fail() {
        // 1 of 10 missing = 10%
        let warn = dataset(vec![Column::new(
            "a",
            (0..10).map(|i| if i == 0 { None } else { Some(i as f64) }),
        )]);
        let result = MissingValuesValidator::default().evaluate(&warn).unwrap();
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.details["a"], json!(0.1));
        assert_eq!(result.recommendations.len(), 1);

        // 6 of 10 missing = 60%
        let fail = dataset(vec![Column::new(
            "a",
            (0..10).map(|i| if i < 6 { None } else { Some(i as f64) }),
        )]);
        let result = MissingValuesValidator::default().evaluate(&fail).unwrap();
        assert_eq!(result.status, Status::Fail);
    }

    #[test]
    fn test_data_types_mixed_fails() {
        let data = dataset(vec![
            Column::new(
                "a",
                [Value::from(1.0), Value::from(2.0), Value::from(3.0), Value::from("x")],
            ),
            Column::new("b", [1.0, 2.0, 3.0, 4.0]),
        ]);
        let result = DataTypeValidator.evaluate(&data).unwrap();

        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.details["a"]["declared_type"], json!("mixed"));
        assert_eq!(result.details["a"]["kinds"], json!(["numeric", "text"]));
        assert!(!result.details.contains_key("b"));
    }

    #[test]
    fn test_outliers() {
        let clean: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let data = dataset(vec![Column::new("x", clean.clone())]);
        let result = OutlierValidator::default().evaluate(&data).unwrap();
        assert_eq!(result.status, Status::Pass);

        // one extreme value in 40 = 2.5% → warn
        let mut values: Vec<f64> = (1..=39).map(|i| i as f64).collect();
        values.push(1000.0);
        let data = dataset(vec![Column::new("x", values)]);
        let result = OutlierValidator::default().evaluate(&data).unwrap();
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.details["x"]["count"], json!(1));

        // one extreme value in 10 = 10% → fail
        let mut values: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        values.push(1000.0);
        let data = dataset(vec![Column::new("x", values)]);
        let result = OutlierValidator::default().evaluate(&data).unwrap();
        assert_eq!(result.status, Status::Fail);
    }

    #[test]
    fn test_high_correlation_reports_pair_once() {
        let cm: Vec<f64> = (0..50).map(|i| 150.0 + i as f64).collect();
        let inches: Vec<f64> = cm.iter().map(|v| v / 2.54).collect();
        let noise: Vec<f64> = (0..50).map(|i| ((i * 37) % 11) as f64).collect();
        let data = dataset(vec![
            Column::new("height_cm", cm),
            Column::new("height_inches", inches),
            Column::new("noise", noise),
        ]);

        let result = CorrelationValidator::default().evaluate(&data).unwrap();
        assert_eq!(result.status, Status::Warn);

        let pairs = result.details[DATASET_KEY].as_array().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0]["columns"], json!(["height_cm", "height_inches"]));
        let r = pairs[0]["correlation"].as_f64().unwrap();
        assert!((r.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_skips_categorical() {
        let data = dataset(vec![
            Column::new("x", [1.0, 2.0, 3.0]),
            Column::new("label", ["a", "b", "c"]),
        ]);
        let result = CorrelationValidator::default().evaluate(&data).unwrap();
        assert_eq!(result.status, Status::Pass);
    }

    #[test]
    fn test_constant_column_fails() {
        let data = dataset(vec![
            Column::new("country", (0..100).map(|_| "USA")),
            Column::new("id", (0..100).map(|i| i as f64)),
        ]);
        let result = ConstantColumnValidator::default().evaluate(&data).unwrap();

        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.details["country"]["cardinality"], json!(1));
        assert!(!result.details.contains_key("id"));
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let data = dataset(vec![Column::new("a", Vec::<f64>::new())]);
        assert!(MissingValuesValidator::default().evaluate(&data).is_err());
    }

    #[test]
    fn test_validate_uses_given_summaries() {
        let data = dataset(vec![Column::new(
            "a",
            (0..10).map(|i| if i < 3 { None } else { Some(i as f64) }),
        )]);
        let mut summaries = Profiler::new().summarize(&data).unwrap();
        summaries["a"].null_ratio = 0.0;

        let validator = MissingValuesValidator::default();
        assert_eq!(validator.evaluate(&data).unwrap().status, Status::Warn);
        assert_eq!(
            validator.validate(&data, &summaries).unwrap().status,
            Status::Pass
        );
    }

    #[test]
    fn test_check_order_and_names() {
        let names: Vec<&str> = Check::all(&ValidationConfig::default())
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "missing_values",
                "data_types",
                "outliers",
                "correlations",
                "constant_columns"
            ]
        );
    }
}
