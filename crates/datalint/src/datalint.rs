//! Main Datalint struct and public API.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DatalintConfig;
use crate::error::Result;
use crate::input::{Parser, SourceMetadata};
use crate::profile::{DriftDetector, DriftReport, DriftSummary, Learner, Profile};
use crate::validation::{ValidationResult, ValidationRunner, ValidationSummary};

/// Result of validating a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// One result per registered check, in order.
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// True when any check failed.
    pub fn is_failure(&self) -> bool {
        self.summary.is_failure()
    }
}

/// Result of comparing a data file against a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftAnalysis {
    /// Metadata about the compared file.
    pub source: SourceMetadata,
    /// Name of the baseline profile.
    pub profile_name: String,
    pub profile_created_at: DateTime<Utc>,
    /// Profile columns first, then columns only present in the new data.
    pub reports: Vec<DriftReport>,
    pub summary: DriftSummary,
}

impl DriftAnalysis {
    pub fn has_drift(&self) -> bool {
        self.summary.has_drift()
    }
}

/// The main datalint engine.
#[derive(Debug, Clone)]
pub struct Datalint {
    parser: Parser,
    learner: Learner,
    detector: DriftDetector,
    runner: ValidationRunner,
}

impl Datalint {
    /// Create a Datalint instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(DatalintConfig::default())
    }

    /// Create a Datalint instance with custom configuration.
    pub fn with_config(config: DatalintConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            learner: Learner::with_config(config.learner, config.profiler.clone()),
            detector: DriftDetector::with_config(config.drift, config.profiler.clone()),
            runner: ValidationRunner::with_config(&config.validation, config.profiler),
        }
    }

    /// Run every check against a data file.
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<ValidationReport> {
        let (dataset, source) = self.parser.parse_file(path)?;

        let results = self.runner.run(&dataset);
        let summary = ValidationSummary::from_results(&results);
        info!(
            file = %source.file,
            passed = summary.passed,
            warned = summary.warned,
            failed = summary.failed,
            "validated dataset"
        );

        Ok(ValidationReport {
            source,
            results,
            summary,
        })
    }

    /// Learn a baseline profile from a clean data file.
    pub fn learn(&self, path: impl AsRef<Path>) -> Result<Profile> {
        let (dataset, source) = self.parser.parse_file(path)?;
        let profile = self.learner.learn(&dataset)?;
        Ok(profile.with_source(&source))
    }

    /// Compare a data file against a baseline profile.
    pub fn check_drift(&self, path: impl AsRef<Path>, profile: &Profile) -> Result<DriftAnalysis> {
        let (dataset, source) = self.parser.parse_file(path)?;

        let reports = self.detector.compare(profile, &dataset)?;
        let summary = DriftSummary::from_reports(&reports);
        info!(
            file = %source.file,
            profile = %profile.name,
            drifted = summary.drifted,
            "checked drift"
        );

        Ok(DriftAnalysis {
            source,
            profile_name: profile.name.clone(),
            profile_created_at: profile.created_at,
            reports,
            summary,
        })
    }
}

impl Default for Datalint {
    fn default() -> Self {
        Self::new()
    }
}
