//! Profiling, profile learning and drift detection.

mod drift;
mod learner;
mod persistence;
mod profiler;
pub mod statistics;

pub use drift::{DriftDetector, DriftEvidence, DriftReport, DriftStatus, DriftSummary};
pub use learner::{Learner, Profile, ProfileSource, PROFILE_SCHEMA_VERSION};
pub use persistence::profile_path;
pub use profiler::{classify, Profiler};
