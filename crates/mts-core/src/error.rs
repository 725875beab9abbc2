//! # Error Types
//!
//! Two failure channels exist for a `TIMESTAMP` column:
//!
//! - [`ValidationError`] is raised by `validate` for application-supplied
//!   values that are not real, in-range dates. Hosts surface it to callers.
//! - [`MtsError`] covers configuration failures: an unresolvable session
//!   timezone or a precision MySQL cannot store.
//!
//! `stringify` and `parse` never produce either; malformed content comes back
//! as the `invalid date` sentinel instead.

use thiserror::Error;

/// A value failed write-time type checking.
///
/// The message always names the offending value, rendered as JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable message, e.g. `"2016-02-31" is not a valid date`.
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level error type for the column type and its configuration.
#[derive(Error, Debug)]
pub enum MtsError {
    /// A value was rejected by `validate`.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The session timezone is neither a known zone nor a `±HH:MM` offset.
    #[error("unknown timezone {0:?}: expected an IANA zone name or a (+|-)HH:MM offset")]
    InvalidTimezone(String),

    /// MySQL stores at most six fractional-second digits.
    #[error("invalid TIMESTAMP precision {0}: must be between 0 and 6")]
    InvalidPrecision(u32),
}
