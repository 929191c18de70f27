//! Validation checks for ML-readiness issues.

mod result;
mod runner;
mod validators;

pub use result::{Status, ValidationResult, ValidationSummary, DATASET_KEY};
pub use runner::{run_isolated, ValidationRunner};
pub use validators::{
    Check, ConstantColumnValidator, CorrelationValidator, DataTypeValidator,
    MissingValuesValidator, OutlierValidator, Summaries, Validator,
};
