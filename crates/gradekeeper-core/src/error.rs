//! Grade scale error types.
//!
//! Grade scales arrive as string-keyed tables (JSON objects, TOML tables).
//! These errors describe keys that cannot be turned into numeric cutoffs.

use thiserror::Error;

/// Errors that can occur when building a [`GradeScale`](crate::scale::GradeScale).
#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    /// A cutoff key could not be parsed as a number.
    #[error("invalid grade cutoff '{0}': not a number")]
    InvalidCutoff(String),

    /// A cutoff parsed but is NaN or infinite.
    #[error("invalid grade cutoff '{0}': must be finite")]
    NonFiniteCutoff(String),

    /// Two keys parse to the same numeric cutoff (e.g. "0.5" and "0.50").
    #[error("duplicate grade cutoff {cutoff} (labels '{first}' and '{second}')")]
    DuplicateCutoff {
        cutoff: f64,
        first: String,
        second: String,
    },
}

impl ScaleError {
    /// Returns the raw key that caused the error, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ScaleError::InvalidCutoff(key) | ScaleError::NonFiniteCutoff(key) => Some(key),
            ScaleError::DuplicateCutoff { .. } => None,
        }
    }
}
