//! Health parameter extraction: a fixed catalogue of lab measurements and
//! the matcher that turns document text into classified records.
//!
//! Pure and synchronous. The catalogue is compiled once on first use and
//! shared read-only, so extraction can run from any thread without locking.

pub mod catalogue;
pub mod classify;
pub mod extractor;

pub use catalogue::{catalogue, find_definition, ParameterDefinition};
pub use classify::{classify_value, ReferenceBounds};
pub use extractor::{extract, extract_from_bytes, extract_with, find_first, ParameterMatch};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("Invalid input: expected UTF-8 text ({0})")]
    InvalidInput(String),
}
