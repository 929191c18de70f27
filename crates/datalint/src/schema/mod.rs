//! Schema types shared by profiling, learning and drift detection.

mod column;
mod types;

pub use column::{ColumnSummary, NumericStatistics, TopValue};
pub use types::{DeclaredType, ValueKind};
