//! CLI command implementations.
//!
//! Each command returns `Ok(true)` when the data passed, `Ok(false)` when a
//! check failed or drift was found.

pub mod profile;
pub mod validate;
