//! Datalint: data validation and drift detection for machine-learning datasets.
//!
//! Datalint checks a tabular dataset for common ML-readiness problems, learns a
//! statistical profile from a dataset known to be clean, and compares new
//! datasets against that profile to detect drift.
//!
//! # Core Principles
//!
//! - **Deterministic**: the same input always yields the same summaries and results
//! - **Non-destructive**: input data is never modified
//! - **Isolated checks**: one failing validator never hides the others
//!
//! # Example
//!
//! ```no_run
//! use datalint::Datalint;
//!
//! let datalint = Datalint::new();
//! let report = datalint.validate("train.csv").unwrap();
//! for result in &report.results {
//!     println!("{}: {}", result.check_name, result.status.label());
//! }
//!
//! let profile = datalint.learn("train.csv").unwrap();
//! let drift = datalint.check_drift("today.csv", &profile).unwrap();
//! println!("Drift detected: {}", drift.has_drift());
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod profile;
pub mod schema;
pub mod validation;

mod datalint;

pub use crate::datalint::{Datalint, DriftAnalysis, ValidationReport};
pub use config::DatalintConfig;
pub use error::{DatalintError, Result};
pub use input::{Column, Dataset, SourceMetadata, Value};
pub use profile::{DriftReport, DriftStatus, DriftSummary, Profile};
pub use schema::{ColumnSummary, DeclaredType, NumericStatistics};
pub use validation::{Status, ValidationResult, ValidationSummary};
