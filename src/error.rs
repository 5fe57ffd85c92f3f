//! Error types for the forecasting engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur during forecasting.
//!
//! Only configuration-class problems are errors: an unknown jurisdiction, a
//! missing threshold row, an unreadable config file, or a malformed shift
//! record. Degenerate data (too little history, zero hours, no candidates)
//! is never an error and instead produces a valid low-confidence result.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the forecasting engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use forecast_engine::error::EngineError;
///
/// let error = EngineError::UnknownJurisdiction {
///     key: "xx".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown jurisdiction: xx");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No threshold rows exist for the requested jurisdiction.
    ///
    /// There is deliberately no default-jurisdiction fallback: a silently
    /// substituted rule set would mask configuration errors. Callers that
    /// want a default must apply it before calling the engine.
    #[error("Unknown jurisdiction: {key}")]
    UnknownJurisdiction {
        /// The jurisdiction key that had no threshold rows.
        key: String,
    },

    /// No threshold row is effective on or before the requested date.
    #[error("No threshold row for jurisdiction '{jurisdiction}' effective on {date}")]
    ThresholdNotFound {
        /// The jurisdiction key.
        jurisdiction: String,
        /// The evaluation date for which no row was effective.
        date: NaiveDate,
    },

    /// A shift record was invalid or contained inconsistent data.
    #[error("Invalid shift record '{shift_id}': {message}")]
    InvalidShiftRecord {
        /// The ID of the invalid shift record.
        shift_id: String,
        /// A description of what made the record invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
