//! Per-column statistical summary.

use serde::{Deserialize, Serialize};

use super::types::DeclaredType;

/// Statistics for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
}

impl NumericStatistics {
    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper IQR fences for the given multiplier.
    pub fn iqr_bounds(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }

    /// Check if a value is an outlier using the IQR method.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let (lower, upper) = self.iqr_bounds(multiplier);
        value < lower || value > upper
    }

    fn is_finite(&self) -> bool {
        [self.min, self.max, self.mean, self.std, self.q1, self.q3]
            .iter()
            .all(|v| v.is_finite())
    }

    /// `min <= q1 <= q3 <= max`, `min <= mean <= max` and `std >= 0`.
    fn is_ordered(&self) -> bool {
        self.min <= self.q1
            && self.q1 <= self.q3
            && self.q3 <= self.max
            && self.min <= self.mean
            && self.mean <= self.max
            && self.std >= 0.0
    }
}

/// One entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub frequency: usize,
}

/// Statistical snapshot of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    pub declared_type: DeclaredType,
    /// Fraction of missing values, in [0, 1].
    pub null_ratio: f64,
    /// Number of distinct non-missing values.
    pub cardinality: usize,
    /// Present iff the column is numeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStatistics>,
    /// Most frequent values, most frequent first. Absent for numeric columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_values: Option<Vec<TopValue>>,
}

impl ColumnSummary {
    /// Values of the frequency table, in rank order.
    pub fn top_value_keys(&self) -> impl Iterator<Item = &str> {
        self.top_values
            .iter()
            .flatten()
            .map(|t| t.value.as_str())
    }

    /// Check the summary invariants against the row count it came from.
    ///
    /// Returns a description of the first violation found.
    pub fn check(&self, row_count: usize) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.null_ratio) {
            return Err(format!(
                "column '{}': null_ratio {} outside [0, 1]",
                self.name, self.null_ratio
            ));
        }
        if self.cardinality > row_count {
            return Err(format!(
                "column '{}': cardinality {} exceeds row count {}",
                self.name, self.cardinality, row_count
            ));
        }
        match (&self.numeric, self.declared_type.is_numeric()) {
            (Some(stats), true) => {
                if !stats.is_finite() {
                    return Err(format!(
                        "column '{}': numeric statistics must be finite",
                        self.name
                    ));
                }
                if !stats.is_ordered() {
                    return Err(format!(
                        "column '{}': numeric statistics out of order (min {}, q1 {}, mean {}, q3 {}, max {}, std {})",
                        self.name, stats.min, stats.q1, stats.mean, stats.q3, stats.max, stats.std
                    ));
                }
            }
            (None, false) => {}
            (Some(_), false) => {
                return Err(format!(
                    "column '{}': numeric statistics on a {} column",
                    self.name, self.declared_type
                ));
            }
            (None, true) => {
                return Err(format!(
                    "column '{}': numeric column without statistics",
                    self.name
                ));
            }
        }
        match (&self.top_values, self.declared_type.is_numeric()) {
            (Some(_), true) => Err(format!(
                "column '{}': top_values on a numeric column",
                self.name
            )),
            (None, false) => Err(format!(
                "column '{}': {} column without top_values",
                self.name, self.declared_type
            )),
            _ => Ok(()),
        }
    }
}
