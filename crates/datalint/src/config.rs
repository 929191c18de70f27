//! Threshold configuration for profiling, learning, drift and validation.
//!
//! Every struct carries documented defaults and can be partially overridden
//! from a JSON file; missing keys keep their default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DatalintError, Result};
use crate::input::ParserConfig;

/// Profiler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilerConfig {
    /// Frequency table entries kept per non-numeric column.
    pub top_values_limit: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            top_values_limit: 10,
        }
    }
}

/// Learner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LearnerConfig {
    /// Fewest rows a profile may be learned from.
    pub min_rows: usize,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self { min_rows: 10 }
    }
}

/// Drift detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftConfig {
    /// Numeric columns drift when the mean shift exceeds this many baseline stds.
    pub z_threshold: f64,
    /// Categorical columns drift when more than this fraction of top values is unseen.
    pub categorical_threshold: f64,
    /// Floor applied to the baseline std.
    pub std_epsilon: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.0,
            categorical_threshold: 0.5,
            std_epsilon: 1e-9,
        }
    }
}

/// Validator thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Null ratio above which a column warns.
    pub missing_warn_ratio: f64,
    /// Null ratio above which a column fails.
    pub missing_fail_ratio: f64,
    /// IQR fence multiplier.
    pub iqr_multiplier: f64,
    /// Outlier ratio above which a column fails.
    pub outlier_fail_ratio: f64,
    /// Absolute Pearson correlation above which a pair warns.
    pub correlation_threshold: f64,
    /// Columns with at most this many distinct values are constant.
    pub constant_max_cardinality: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            missing_warn_ratio: 0.05,
            missing_fail_ratio: 0.5,
            iqr_multiplier: 1.5,
            outlier_fail_ratio: 0.05,
            correlation_threshold: 0.95,
            constant_max_cardinality: 1,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatalintConfig {
    /// Loader configuration; not read from files.
    #[serde(skip)]
    pub parser: ParserConfig,
    pub profiler: ProfilerConfig,
    pub learner: LearnerConfig,
    pub drift: DriftConfig,
    pub validation: ValidationConfig,
}

impl DatalintConfig {
    /// Load overrides from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DatalintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|e| match e {
            DatalintError::Config(msg) => {
                DatalintError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse overrides from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DatalintError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        let v = &self.validation;
        if v.missing_warn_ratio > v.missing_fail_ratio {
            return Err(DatalintError::Config(format!(
                "missing_warn_ratio ({}) must not exceed missing_fail_ratio ({})",
                v.missing_warn_ratio, v.missing_fail_ratio
            )));
        }
        if self.drift.std_epsilon <= 0.0 {
            return Err(DatalintError::Config(
                "std_epsilon must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
