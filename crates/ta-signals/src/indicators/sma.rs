//! Simple Moving Average (SMA) indicator.
//!
//! The trailing arithmetic mean of the last `period` values.
//!
//! # Algorithm
//!
//! O(n) rolling sum: the first window is summed once, then each step adds
//! the incoming value and subtracts the outgoing one. NaN values are counted
//! rather than summed so a single NaN only affects the windows containing it.
//!
//! # Formula
//!
//! ```text
//! SMA[i] = (P[i-n+1] + ... + P[i]) / n
//! ```
//!
//! # Example
//!
//! ```
//! use ta_signals::indicators::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! assert!((result[4] - 4.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::traits::{validate_window, SeriesElement};

/// Number of leading NaN values in the SMA output.
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Minimum input length that produces at least one SMA value.
#[inline]
#[must_use]
pub const fn sma_min_len(period: usize) -> usize {
    period
}

/// Computes the Simple Moving Average of a data series.
///
/// Returns a vector of the same length as the input; the first `period - 1`
/// values are NaN.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the period is zero
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data is shorter than the period
#[must_use = "this returns a Result with the SMA values, which should be used"]
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_window(data, period, "sma")?;

    let period_t = T::from_usize(period)?;
    let mut result = vec![T::nan(); data.len()];

    let mut sum = T::zero();
    let mut nan_count = 0usize;
    for &value in data.iter().take(period) {
        if value.is_nan() {
            nan_count += 1;
        } else {
            sum = sum + value;
        }
    }
    if nan_count == 0 {
        result[period - 1] = sum / period_t;
    }

    for i in period..data.len() {
        let incoming = data[i];
        let outgoing = data[i - period];

        if incoming.is_nan() {
            nan_count += 1;
        } else {
            sum = sum + incoming;
        }
        if outgoing.is_nan() {
            nan_count -= 1;
        } else {
            sum = sum - outgoing;
        }

        if nan_count == 0 {
            result[i] = sum / period_t;
        }
    }

    Ok(result)
}
