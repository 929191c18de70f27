//! Column summarization.

use indexmap::IndexMap;
use tracing::debug;

use super::statistics::{frequency_table, numeric_statistics, observed_kinds, top_values};
use crate::config::ProfilerConfig;
use crate::error::{DatalintError, Result};
use crate::input::{Column, Dataset};
use crate::schema::{ColumnSummary, DeclaredType, ValueKind};

/// Computes a [`ColumnSummary`] for every column of a dataset.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Summarize every column, keyed by name in dataset order.
    pub fn summarize(&self, dataset: &Dataset) -> Result<IndexMap<String, ColumnSummary>> {
        let row_count = dataset.row_count();
        if row_count == 0 {
            return Err(DatalintError::EmptyDataset(format!(
                "'{}' has no rows to summarize",
                dataset.name
            )));
        }

        let summaries = dataset
            .columns()
            .iter()
            .map(|column| {
                let summary = self.summarize_column(column, row_count);
                debug!(
                    column = %summary.name,
                    declared_type = %summary.declared_type,
                    null_ratio = summary.null_ratio,
                    cardinality = summary.cardinality,
                    "summarized column"
                );
                (summary.name.clone(), summary)
            })
            .collect();

        Ok(summaries)
    }

    /// Summarize one column against the dataset row count.
    pub fn summarize_column(&self, column: &Column, row_count: usize) -> ColumnSummary {
        let declared_type = classify(column);
        let counts = frequency_table(column);

        let (numeric, top) = if declared_type.is_numeric() {
            (numeric_statistics(&column.numeric_values()), None)
        } else {
            (None, Some(top_values(&counts, self.config.top_values_limit)))
        };

        let null_ratio = if row_count == 0 {
            0.0
        } else {
            column.missing_count() as f64 / row_count as f64
        };

        ColumnSummary {
            name: column.name.clone(),
            declared_type,
            null_ratio,
            cardinality: counts.len(),
            numeric,
            top_values: top,
        }
    }
}

/// Declared type from the kinds of non-missing values.
///
/// An all-missing column has no evidence either way and is categorical.
pub fn classify(column: &Column) -> DeclaredType {
    match observed_kinds(column).as_slice() {
        [] | [ValueKind::Text] => DeclaredType::Categorical,
        [ValueKind::Numeric] => DeclaredType::Numeric,
        [ValueKind::Boolean] => DeclaredType::Boolean,
        _ => DeclaredType::Mixed,
    }
}
