//! Validation outcome types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome level of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        }
    }
}

/// Key used in `details` for evidence about the whole dataset.
pub const DATASET_KEY: &str = "dataset";

/// The outcome of one validator against one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Name of the validator that produced this result.
    pub check_name: String,
    pub status: Status,
    /// Human-readable summary.
    pub message: String,
    /// Evidence keyed by column name, or [`DATASET_KEY`].
    #[serde(default)]
    pub details: IndexMap<String, Value>,
    /// Suggested remediation steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Create a new result with no evidence attached.
    pub fn new(check_name: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.into(),
            status,
            message: message.into(),
            details: IndexMap::new(),
            recommendations: Vec::new(),
        }
    }

    /// Attach evidence for a column (or the dataset).
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Replace all evidence.
    pub fn with_details(mut self, details: IndexMap<String, Value>) -> Self {
        self.details = details;
        self
    }

    /// Set the recommendations.
    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn is_failure(&self) -> bool {
        self.status == Status::Fail
    }
}

/// Counts of results by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                Status::Pass => summary.passed += 1,
                Status::Warn => summary.warned += 1,
                Status::Fail => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.warned + self.failed
    }

    /// True when any check failed.
    pub fn is_failure(&self) -> bool {
        self.failed > 0
    }

    /// Worst status seen, `Pass` when there were no results.
    pub fn overall(&self) -> Status {
        if self.failed > 0 {
            Status::Fail
        } else if self.warned > 0 {
            Status::Warn
        } else {
            Status::Pass
        }
    }
}
