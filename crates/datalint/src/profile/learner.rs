//! Baseline profiles learned from clean datasets.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::profiler::Profiler;
use crate::config::{LearnerConfig, ProfilerConfig};
use crate::error::{DatalintError, Result};
use crate::input::{Dataset, SourceMetadata};
use crate::schema::ColumnSummary;

/// Current profile document version.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Where a profile's source data came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSource {
    /// File name without path.
    pub file: String,
    /// SHA-256 hash of the file contents.
    pub hash: String,
}

impl From<&SourceMetadata> for ProfileSource {
    fn from(meta: &SourceMetadata) -> Self {
        Self {
            file: meta.file.clone(),
            hash: meta.hash.clone(),
        }
    }
}

/// Statistical snapshot of a clean dataset, used as a drift baseline.
///
/// Profiles are never modified after creation; re-learning yields a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub schema_version: u32,
    /// Name of the dataset the profile was learned from.
    pub name: String,
    pub row_count: usize,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ProfileSource>,
    /// Column summaries in source column order.
    pub columns: IndexMap<String, ColumnSummary>,
}

impl Profile {
    /// Attach source file metadata.
    pub fn with_source(mut self, source: &SourceMetadata) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Verify the profile invariants, as required before a profile is trusted.
    pub fn check(&self) -> Result<()> {
        if self.schema_version != PROFILE_SCHEMA_VERSION {
            return Err(DatalintError::MalformedProfile(format!(
                "unsupported schema_version {} (expected {})",
                self.schema_version, PROFILE_SCHEMA_VERSION
            )));
        }
        if self.row_count == 0 {
            return Err(DatalintError::MalformedProfile(
                "row_count must be positive".to_string(),
            ));
        }
        for (key, summary) in &self.columns {
            if key != &summary.name {
                return Err(DatalintError::MalformedProfile(format!(
                    "column key '{}' does not match summary name '{}'",
                    key, summary.name
                )));
            }
            summary
                .check(self.row_count)
                .map_err(DatalintError::MalformedProfile)?;
        }
        Ok(())
    }
}

/// Builds profiles from datasets declared clean.
#[derive(Debug, Clone, Default)]
pub struct Learner {
    config: LearnerConfig,
    profiler: Profiler,
}

impl Learner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LearnerConfig, profiler: ProfilerConfig) -> Self {
        Self {
            config,
            profiler: Profiler::with_config(profiler),
        }
    }

    /// Learn a profile, rejecting datasets too small to be reliable.
    pub fn learn(&self, dataset: &Dataset) -> Result<Profile> {
        let rows = dataset.row_count();
        if rows == 0 {
            return Err(DatalintError::EmptyDataset(format!(
                "cannot learn a profile from '{}': no rows",
                dataset.name
            )));
        }
        if rows < self.config.min_rows {
            return Err(DatalintError::InsufficientData {
                rows,
                minimum: self.config.min_rows,
            });
        }

        let columns = self.profiler.summarize(dataset)?;
        info!(
            dataset = %dataset.name,
            rows,
            columns = columns.len(),
            "learned profile"
        );

        let profile = Profile {
            schema_version: PROFILE_SCHEMA_VERSION,
            name: dataset.name.clone(),
            row_count: rows,
            created_at: Utc::now(),
            source: None,
            columns,
        };
        profile.check()?;
        Ok(profile)
    }
}
