//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! - **MACD Line**: short EMA minus long EMA
//! - **Signal Line**: EMA of the MACD line
//! - **Histogram**: MACD line minus signal line
//!
//! All three use the recursive EMA from [`crate::indicators::ema`], seeded
//! with the first observation, so every output is defined from index 0.
//!
//! # Formula
//!
//! ```text
//! MACD[i]      = EMA(short)[i] − EMA(long)[i]
//! Signal[i]    = EMA(MACD, signal)[i]
//! Histogram[i] = MACD[i] − Signal[i]
//! ```
//!
//! # Example
//!
//! ```
//! use ta_signals::indicators::macd;
//!
//! let data: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64) * 0.5).collect();
//! let result = macd(&data, 12, 26, 9).unwrap();
//!
//! assert_eq!(result.len(), 40);
//! assert!(result.macd_line[0].abs() < 1e-10);
//! // a steady uptrend keeps the short EMA above the long one
//! assert!(result.macd_line[39] > 0.0);
//! ```

use crate::error::{Error, Result};
use crate::indicators::ema::{ema_recursive, ema_unchecked};
use crate::traits::{validate_period, SeriesElement, ValidatedInput};

/// The output of a MACD calculation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacdOutput<T> {
    /// Short EMA minus long EMA.
    pub macd_line: Vec<T>,
    /// EMA of the MACD line.
    pub signal_line: Vec<T>,
    /// MACD line minus signal line.
    pub histogram: Vec<T>,
}

impl<T: SeriesElement> MacdOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

/// Minimum input length accepted by [`macd`].
#[inline]
#[must_use]
pub const fn macd_min_len(long_period: usize, signal_period: usize) -> usize {
    if long_period > signal_period {
        long_period
    } else {
        signal_period
    }
}

/// Computes MACD, its signal line and histogram.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if any period is zero
/// - `Error::InvalidParameter` if `short_period >= long_period`
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data is shorter than the long or signal period
#[must_use = "this returns a Result with the MACD output, which should be used"]
pub fn macd<T: SeriesElement>(
    data: &[T],
    short_period: usize,
    long_period: usize,
    signal_period: usize,
) -> Result<MacdOutput<T>> {
    validate_macd_inputs(data, short_period, long_period, signal_period)?;

    let short_alpha = T::two() / T::from_usize(short_period + 1)?;
    let long_alpha = T::two() / T::from_usize(long_period + 1)?;

    let short_ema = ema_recursive(data, short_alpha);
    let long_ema = ema_recursive(data, long_alpha);

    let macd_line: Vec<T> = short_ema
        .iter()
        .zip(&long_ema)
        .map(|(&s, &l)| s - l)
        .collect();
    let signal_line = ema_unchecked(&macd_line, signal_period)?;
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&m, &s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd_line,
        signal_line,
        histogram,
    })
}

fn validate_macd_inputs<T: SeriesElement>(
    data: &[T],
    short_period: usize,
    long_period: usize,
    signal_period: usize,
) -> Result<()> {
    validate_period(short_period)?;
    validate_period(long_period)?;
    validate_period(signal_period)?;
    if short_period >= long_period {
        return Err(Error::InvalidParameter {
            name: "short_period",
            reason: "short_period must be less than long_period",
        });
    }

    data.validate_not_empty()?;
    data.validate_min_length(macd_min_len(long_period, signal_period), "macd")
}

/// MACD configuration with fluent builder API.
///
/// Defaults to the conventional (12, 26, 9).
///
/// ```
/// use ta_signals::indicators::Macd;
///
/// let prices: Vec<f64> = (0..30).map(|i| 50.0 + (i as f64).sin()).collect();
/// let result = Macd::new().short_period(5).long_period(10).compute(&prices).unwrap();
/// assert_eq!(result.len(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    short_period: usize,
    long_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            short_period: 12,
            long_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    /// Creates a configuration with the conventional (12, 26, 9).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the short EMA span.
    #[must_use]
    pub const fn short_period(mut self, period: usize) -> Self {
        self.short_period = period;
        self
    }

    /// Sets the long EMA span.
    #[must_use]
    pub const fn long_period(mut self, period: usize) -> Self {
        self.long_period = period;
        self
    }

    /// Sets the signal EMA span.
    #[must_use]
    pub const fn signal_period(mut self, period: usize) -> Self {
        self.signal_period = period;
        self
    }

    /// Computes MACD with the configured spans.
    ///
    /// # Errors
    ///
    /// See [`macd`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        macd(data, self.short_period, self.long_period, self.signal_period)
    }

    /// Returns the short EMA span.
    #[must_use]
    pub const fn get_short_period(&self) -> usize {
        self.short_period
    }

    /// Returns the long EMA span.
    #[must_use]
    pub const fn get_long_period(&self) -> usize {
        self.long_period
    }

    /// Returns the signal EMA span.
    #[must_use]
    pub const fn get_signal_period(&self) -> usize {
        self.signal_period
    }

    /// Number of leading NaN values in every output line (always zero).
    #[must_use]
    pub const fn lookback(&self) -> usize {
        0
    }
}
