//! Exponential Moving Average (EMA), recursive form.
//!
//! # Formula
//!
//! ```text
//! α      = 2 / (span + 1)
//! EMA[0] = P[0]
//! EMA[i] = α × P[i] + (1 − α) × EMA[i−1]
//! ```
//!
//! The recursion is seeded with the first observation rather than an SMA of
//! the first `span` values, and no bias-correcting weights are applied. The
//! output is therefore defined from index 0, with early values leaning
//! towards the first price.
//!
//! A NaN input produces NaN at its own position only; the recursion resumes
//! from the last defined value.
//!
//! # Example
//!
//! ```
//! use ta_signals::indicators::ema;
//!
//! let data = vec![10.0_f64, 11.0, 12.0];
//! let result = ema(&data, 3).unwrap();
//!
//! // α = 0.5
//! assert!((result[0] - 10.0).abs() < 1e-10);
//! assert!((result[1] - 10.5).abs() < 1e-10);
//! assert!((result[2] - 11.25).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::traits::{validate_window, SeriesElement};

/// Number of leading NaN values in the EMA output (always zero).
#[inline]
#[must_use]
pub const fn ema_lookback(_span: usize) -> usize {
    0
}

/// Minimum input length accepted for a given span.
#[inline]
#[must_use]
pub const fn ema_min_len(span: usize) -> usize {
    span
}

/// Smoothing factor α = 2 / (span + 1).
fn standard_alpha<T: SeriesElement>(span: usize) -> Result<T> {
    Ok(T::two() / T::from_usize(span + 1)?)
}

/// Computes the recursive Exponential Moving Average of a data series.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the span is zero
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data is shorter than the span
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema<T: SeriesElement>(data: &[T], span: usize) -> Result<Vec<T>> {
    validate_window(data, span, "ema")?;
    let alpha = standard_alpha(span)?;
    Ok(ema_recursive(data, alpha))
}

/// Applies the recursion to an already validated series.
pub(crate) fn ema_recursive<T: SeriesElement>(data: &[T], alpha: T) -> Vec<T> {
    let one_minus_alpha = T::one() - alpha;
    let mut output = Vec::with_capacity(data.len());
    let mut prev: Option<T> = None;

    for &value in data {
        if value.is_nan() {
            output.push(T::nan());
            continue;
        }
        let current = match prev {
            None => value,
            Some(p) => alpha * value + one_minus_alpha * p,
        };
        output.push(current);
        prev = Some(current);
    }

    output
}

/// EMA over a series whose span was validated elsewhere (used for MACD's
/// signal line, where the input is itself derived).
pub(crate) fn ema_unchecked<T: SeriesElement>(data: &[T], span: usize) -> Result<Vec<T>> {
    let alpha = standard_alpha(span)?;
    Ok(ema_recursive(data, alpha))
}
