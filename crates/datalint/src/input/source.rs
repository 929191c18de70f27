//! In-memory dataset model and source metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DatalintError, Result};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numeric(f64),
    Text(String),
    Boolean(bool),
    Missing,
}

impl Value {
    /// Type a raw cell the way the loader does.
    ///
    /// Null tokens become `Missing`, `true`/`false` become `Boolean`,
    /// finite numbers become `Numeric`, anything else stays `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_null_token(trimmed) {
            return Value::Missing;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Numeric(n),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric reading of the value, if it has one.
    ///
    /// Text that parses as a finite number counts, so hand-built datasets
    /// holding `Text("3")` behave like loaded ones.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(n) if n.is_finite() => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Numeric(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Numeric(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Missing)
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from anything convertible into values.
    pub fn new<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing numeric readings, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }
}

/// A named, ordered collection of equally long columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset, checking that names are unique and lengths agree.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DatalintError::InvalidDataset(format!(
                    "duplicate column name '{}' in '{}'",
                    column.name, name
                )));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(ragged) = columns.iter().find(|c| c.len() != expected) {
                return Err(DatalintError::InvalidDataset(format!(
                    "column '{}' has {} rows, expected {}",
                    ragged.name,
                    ragged.len(),
                    expected
                )));
            }
        }

        Ok(Self { name, columns })
    }

    /// Build a dataset from string headers and row-major raw cells.
    pub fn from_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: &[Vec<String>],
    ) -> Result<Self> {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, header)| Column {
                name: header,
                values: rows
                    .iter()
                    .map(|row| row.get(idx).map(|s| Value::parse(s)).unwrap_or(Value::Missing))
                    .collect(),
            })
            .collect();

        Self::new(name, columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows; zero when there are no columns.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }
}

/// Check if a trimmed cell represents a missing value.
pub fn is_null_token(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("na")
        || value.eq_ignore_ascii_case("n/a")
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("null")
        || value.eq_ignore_ascii_case("none")
        || value.eq_ignore_ascii_case("nil")
        || value == "."
        || value == "-"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse("42"), Value::Numeric(42.0));
        assert_eq!(Value::parse(" 1.5 "), Value::Numeric(1.5));
        assert_eq!(Value::parse("TRUE"), Value::Boolean(true));
        assert_eq!(Value::parse("NA"), Value::Missing);
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("inf"), Value::Text("inf".to_string()));
        assert_eq!(Value::parse("USA"), Value::Text("USA".to_string()));
    }

    #[test]
    fn test_is_null_token() {
        assert!(is_null_token(""));
        assert!(is_null_token("NA"));
        assert!(is_null_token("n/a"));
        assert!(is_null_token("NULL"));
        assert!(is_null_token("."));
        assert!(!is_null_token("value"));
        assert!(!is_null_token("0"));
    }

    #[test]
    fn test_dataset_rejects_duplicate_names() {
        let err = Dataset::new(
            "dup",
            vec![Column::new("a", [1.0]), Column::new("a", [2.0])],
        )
        .unwrap_err();
        assert!(matches!(err, DatalintError::InvalidDataset(_)));
    }

    #[test]
    fn test_dataset_rejects_ragged_columns() {
        let err = Dataset::new(
            "ragged",
            vec![Column::new("a", [1.0, 2.0]), Column::new("b", [1.0])],
        )
        .unwrap_err();
        assert!(matches!(err, DatalintError::InvalidDataset(_)));
    }

    #[test]
    fn test_from_rows_types_cells() {
        let dataset = Dataset::from_rows(
            "people",
            vec!["name".into(), "age".into()],
            &[
                vec!["Alice".into(), "30".into()],
                vec!["Bob".into(), "NA".into()],
            ],
        )
        .unwrap();

        assert_eq!(dataset.row_count(), 2);
        let age = dataset.column("age").unwrap();
        assert_eq!(age.values, vec![Value::Numeric(30.0), Value::Missing]);
        assert_eq!(age.missing_count(), 1);
    }

    #[test]
    fn test_option_into_value() {
        let column = Column::new("x", [Some(1.0), None]);
        assert_eq!(column.values, vec![Value::Numeric(1.0), Value::Missing]);
    }
}
