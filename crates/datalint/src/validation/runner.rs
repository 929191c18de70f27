//! Runs the registered checks with per-check isolation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::json;
use tracing::{debug, warn};

use super::result::{Status, ValidationResult, DATASET_KEY};
use super::validators::{Check, Validator};
use crate::config::{ProfilerConfig, ValidationConfig};
use crate::error::{DatalintError, Result};
use crate::input::Dataset;
use crate::profile::Profiler;

/// Runs every registered check against a dataset.
#[derive(Debug, Clone)]
pub struct ValidationRunner {
    checks: Vec<Check>,
    profiler: Profiler,
}

impl ValidationRunner {
    /// Create a runner with the default thresholds.
    pub fn new() -> Self {
        Self::with_config(&ValidationConfig::default(), ProfilerConfig::default())
    }

    pub fn with_config(config: &ValidationConfig, profiler: ProfilerConfig) -> Self {
        Self {
            checks: Check::all(config),
            profiler: Profiler::with_config(profiler),
        }
    }

    /// Run all checks. Always yields one result per check, in order.
    ///
    /// The dataset is summarized once and every check reads the same
    /// summaries. If summarizing fails, each check fails with that error.
    pub fn run(&self, dataset: &Dataset) -> Vec<ValidationResult> {
        let summaries = panic::catch_unwind(AssertUnwindSafe(|| self.profiler.summarize(dataset)))
            .map_err(|payload| panic_message(payload.as_ref()))
            .and_then(|summarized| summarized.map_err(|err| err.to_string()));

        let results: Vec<ValidationResult> = match &summaries {
            Ok(summaries) => self
                .checks
                .iter()
                .map(|check| isolate(check.name(), || check.validate(dataset, summaries)))
                .collect(),
            Err(message) => self
                .checks
                .iter()
                .map(|check| failure(check.name(), message.clone()))
                .collect(),
        };

        debug!(
            dataset = %dataset.name,
            checks = results.len(),
            failed = results.iter().filter(|r| r.is_failure()).count(),
            "validation complete"
        );
        results
    }
}

impl Default for ValidationRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate one validator, turning an error or panic into a failing result.
///
/// Panics are caught after the process panic hook has run, so the default
/// hook still prints the panic message to stderr. Install a quiet hook with
/// [`std::panic::set_hook`] to suppress it.
pub fn run_isolated(validator: &dyn Validator, dataset: &Dataset) -> ValidationResult {
    isolate(validator.name(), || validator.evaluate(dataset))
}

fn isolate(name: &'static str, check: impl FnOnce() -> Result<ValidationResult>) -> ValidationResult {
    let message = match panic::catch_unwind(AssertUnwindSafe(check)) {
        Ok(Ok(result)) => return result,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    failure(name, message)
}

fn failure(name: &'static str, message: String) -> ValidationResult {
    let err = DatalintError::ValidatorExecution {
        check: name.to_string(),
        message: message.clone(),
    };
    warn!(check = name, error = %err, "validator did not complete");

    ValidationResult::new(name, Status::Fail, err.to_string())
        .with_detail(DATASET_KEY, json!({ "error": message }))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
