//! Core type definitions for column classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a profiled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    /// Every non-missing value is a number.
    Numeric,
    /// Every non-missing value is a text token.
    Categorical,
    /// Every non-missing value is true/false.
    Boolean,
    /// More than one scalar kind among non-missing values.
    Mixed,
}

impl DeclaredType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DeclaredType::Numeric)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeclaredType::Numeric => "numeric",
            DeclaredType::Categorical => "categorical",
            DeclaredType::Boolean => "boolean",
            DeclaredType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scalar kind of a single non-missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Numeric,
    Boolean,
    Text,
}

impl ValueKind {
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Numeric => "numeric",
            ValueKind::Boolean => "boolean",
            ValueKind::Text => "text",
        }
    }
}
