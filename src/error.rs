//! Error types for fieldplan.
//!
//! Only malformed input is an error. Empty slot lists and failed
//! validations are ordinary results.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type for fieldplan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when input records cannot be turned into domain models.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A window whose end is not after its start.
    #[error("Malformed window: end {end} is not after start {start}")]
    MalformedWindow {
        /// Window start.
        start: NaiveDateTime,
        /// Window end.
        end: NaiveDateTime,
    },

    /// A match duration that is zero or negative.
    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(i64),

    /// A slot grid that cannot be scanned.
    #[error("Invalid slot grid: {0}")]
    InvalidGrid(String),

    /// A raw record lacks a field required to build the model.
    #[error("Record '{record}' is missing '{field}'")]
    MissingField {
        /// Record identifier.
        record: String,
        /// Missing field name.
        field: &'static str,
    },

    /// A request record whose kind is neither blackout nor availability.
    #[error("Unknown request kind: {0}")]
    UnknownRequestKind(String),
}
