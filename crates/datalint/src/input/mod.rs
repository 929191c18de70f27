//! Dataset model and file loading.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{is_null_token, Column, Dataset, SourceMetadata, Value};
