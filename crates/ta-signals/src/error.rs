//! Error types for ta-signals.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Validation
//! happens before any computation, so an error never leaves partial output
//! behind.

use std::fmt;

use thiserror::Error;

/// Which side of the book a level list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LevelSide {
    /// Levels built from local minima.
    Support,
    /// Levels built from local maxima.
    Resistance,
}

impl fmt::Display for LevelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Support => f.write_str("support"),
            Self::Resistance => f.write_str("resistance"),
        }
    }
}

/// The main error type for ta-signals operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input data series is empty.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The input data series is too short for the requested window.
    ///
    /// A window equal to the input length is accepted and yields a single
    /// defined value; only a window exceeding it is rejected.
    #[error("insufficient data for {indicator}: required {required} elements, got {actual}")]
    InsufficientData {
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
        /// Name of the operation that rejected the input.
        indicator: &'static str,
    },

    /// Columns that must be aligned have different lengths.
    #[error("length mismatch: {description}")]
    LengthMismatch {
        /// Which columns disagree.
        description: String,
    },

    /// Bar timestamps are not strictly increasing.
    #[error("timestamp at index {index} ({current}) is not after the previous one ({previous})")]
    NonMonotonicTimestamp {
        /// Position of the offending bar.
        index: usize,
        /// Timestamp of the bar before it.
        previous: i64,
        /// Timestamp of the offending bar.
        current: i64,
    },

    /// A bar violates the OHLC ordering or holds a non-finite value.
    #[error("invalid bar at index {index}: {reason}")]
    InvalidBar {
        /// Position of the offending bar.
        index: usize,
        /// Which invariant failed.
        reason: &'static str,
    },

    /// The period parameter is invalid.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A non-period numeric parameter is out of its domain.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the API.
        name: &'static str,
        /// Description of why the value is rejected.
        reason: &'static str,
    },

    /// No candidate level reached the touch threshold, so there is nothing to merge.
    #[error("no {side} level reached the touch threshold")]
    NoQualifyingLevels {
        /// The side whose level list came out empty.
        side: LevelSide,
    },

    /// Failed to convert a numeric value to the target type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the ta-signals Error type.
pub type Result<T> = std::result::Result<T, Error>;
