//! Drift detection against a stored profile.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::learner::Profile;
use super::profiler::Profiler;
use crate::config::{DriftConfig, ProfilerConfig};
use crate::error::{DatalintError, Result};
use crate::input::Dataset;
use crate::schema::{ColumnSummary, DeclaredType};

/// Classification of one column against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatus {
    Stable,
    Drifted,
    Added,
    Removed,
    TypeChanged,
}

impl DriftStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DriftStatus::Stable => "stable",
            DriftStatus::Drifted => "drifted",
            DriftStatus::Added => "added",
            DriftStatus::Removed => "removed",
            DriftStatus::TypeChanged => "type_changed",
        }
    }

    /// Whether this status should fail a drift check.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DriftStatus::Drifted | DriftStatus::TypeChanged | DriftStatus::Removed
        )
    }
}

/// What a drift classification was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriftEvidence {
    /// Standardized mean shift of a numeric column.
    ZScore {
        z: f64,
        baseline_mean: f64,
        baseline_std: f64,
        current_mean: f64,
    },
    /// Share of current top values never seen in the baseline.
    UnseenValues { fraction: f64, unseen: Vec<String> },
    TypeChange {
        expected: DeclaredType,
        found: DeclaredType,
    },
    /// Column only exists on one side.
    Presence { declared_type: DeclaredType },
    NotCompared { reason: String },
}

/// Drift classification for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub column_name: String,
    pub status: DriftStatus,
    pub evidence: DriftEvidence,
}

/// Counts of drift reports by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftSummary {
    pub stable: usize,
    pub drifted: usize,
    pub added: usize,
    pub removed: usize,
    pub type_changed: usize,
}

impl DriftSummary {
    pub fn from_reports(reports: &[DriftReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.status {
                DriftStatus::Stable => summary.stable += 1,
                DriftStatus::Drifted => summary.drifted += 1,
                DriftStatus::Added => summary.added += 1,
                DriftStatus::Removed => summary.removed += 1,
                DriftStatus::TypeChanged => summary.type_changed += 1,
            }
        }
        summary
    }

    /// True when any column drifted, changed type or disappeared.
    pub fn has_drift(&self) -> bool {
        self.drifted + self.type_changed + self.removed > 0
    }
}

/// Compares datasets against a baseline profile.
#[derive(Debug, Clone, Default)]
pub struct DriftDetector {
    config: DriftConfig,
    profiler: Profiler,
}

impl DriftDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DriftConfig, profiler: ProfilerConfig) -> Self {
        Self {
            config,
            profiler: Profiler::with_config(profiler),
        }
    }

    /// Classify every column in the union of profile and dataset.
    ///
    /// Profile columns come first in profile order, followed by columns
    /// that only exist in the dataset, in dataset order.
    pub fn compare(&self, profile: &Profile, dataset: &Dataset) -> Result<Vec<DriftReport>> {
        let current = self.profiler.summarize(dataset)?;

        if !profile.columns.is_empty()
            && !current.is_empty()
            && !profile.columns.keys().any(|name| current.contains_key(name))
        {
            return Err(DatalintError::SchemaMismatch(format!(
                "profile '{}' and dataset '{}' share no columns",
                profile.name, dataset.name
            )));
        }

        let mut reports = Vec::with_capacity(profile.columns.len() + current.len());

        for (name, baseline) in &profile.columns {
            let report = match current.get(name) {
                Some(now) => self.compare_column(baseline, now),
                None => DriftReport {
                    column_name: name.clone(),
                    status: DriftStatus::Removed,
                    evidence: DriftEvidence::Presence {
                        declared_type: baseline.declared_type,
                    },
                },
            };
            reports.push(report);
        }

        for (name, now) in &current {
            if !profile.columns.contains_key(name) {
                reports.push(DriftReport {
                    column_name: name.clone(),
                    status: DriftStatus::Added,
                    evidence: DriftEvidence::Presence {
                        declared_type: now.declared_type,
                    },
                });
            }
        }

        for report in reports.iter().filter(|r| r.status.is_failure()) {
            warn!(
                column = %report.column_name,
                status = report.status.label(),
                "column drifted from profile"
            );
        }

        Ok(reports)
    }

    /// Classify a column present on both sides.
    pub fn compare_column(&self, baseline: &ColumnSummary, current: &ColumnSummary) -> DriftReport {
        let column_name = baseline.name.clone();

        if baseline.declared_type != current.declared_type {
            return DriftReport {
                column_name,
                status: DriftStatus::TypeChanged,
                evidence: DriftEvidence::TypeChange {
                    expected: baseline.declared_type,
                    found: current.declared_type,
                },
            };
        }

        let (drifted, evidence) = match baseline.declared_type {
            DeclaredType::Numeric => match (&baseline.numeric, &current.numeric) {
                (Some(base), Some(now)) => {
                    let z = (now.mean - base.mean).abs() / base.std.max(self.config.std_epsilon);
                    debug!(column = %column_name, z, "numeric drift score");
                    (
                        z > self.config.z_threshold,
                        DriftEvidence::ZScore {
                            z,
                            baseline_mean: base.mean,
                            baseline_std: base.std,
                            current_mean: now.mean,
                        },
                    )
                }
                _ => (
                    false,
                    DriftEvidence::NotCompared {
                        reason: "no numeric statistics on one side".to_string(),
                    },
                ),
            },
            DeclaredType::Categorical | DeclaredType::Boolean => {
                let known: HashSet<&str> = baseline.top_value_keys().collect();
                let current_top: Vec<&str> = current.top_value_keys().collect();
                let unseen: Vec<String> = current_top
                    .iter()
                    .filter(|v| !known.contains(*v))
                    .map(|v| v.to_string())
                    .collect();
                let fraction = if current_top.is_empty() {
                    0.0
                } else {
                    unseen.len() as f64 / current_top.len() as f64
                };
                debug!(column = %column_name, fraction, "categorical drift score");
                (
                    fraction > self.config.categorical_threshold,
                    DriftEvidence::UnseenValues { fraction, unseen },
                )
            }
            DeclaredType::Mixed => (
                false,
                DriftEvidence::NotCompared {
                    reason: "mixed-type column".to_string(),
                },
            ),
        };

        DriftReport {
            column_name,
            status: if drifted {
                DriftStatus::Drifted
            } else {
                DriftStatus::Stable
            },
            evidence,
        }
    }
}
