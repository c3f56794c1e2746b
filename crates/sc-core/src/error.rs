//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so validation failures raised here surface
//! unchanged at the call site.

use thiserror::Error;

/// Errors raised by validation helpers in `sc-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A top-level parameter was malformed (empty, non-positive, NaN …).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Shorthand result type for `sc-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reject a radius or speed that is not a positive, finite number.
pub fn require_positive(what: &str, value: f64) -> CoreResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::InvalidInput(format!(
            "{what} must be a positive finite number, got {value}"
        )))
    }
}
